//! Formatting shorthands over [`LevelGatedLogger::emit_lazy`](crate::LevelGatedLogger::emit_lazy).
//!
//! `gate_info!(logger, self, "connected to {}", addr)` tags the record with the
//! type of `self` and only formats the message when the info tier is enabled.

#[doc(hidden)]
#[macro_export]
macro_rules! __gate_emit {
    ($severity:ident, $logger:expr, $context:expr, $($arg:tt)+) => {
        $logger.emit_lazy(
            $crate::Severity::$severity,
            &$crate::Tag::of($context),
            ::core::option::Option::None,
            || ::std::format!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! gate_trace {
    ($logger:expr, $context:expr, $($arg:tt)+) => { $crate::__gate_emit!(Trace, $logger, $context, $($arg)+) };
}

#[macro_export]
macro_rules! gate_debug {
    ($logger:expr, $context:expr, $($arg:tt)+) => { $crate::__gate_emit!(Debug, $logger, $context, $($arg)+) };
}

#[macro_export]
macro_rules! gate_info {
    ($logger:expr, $context:expr, $($arg:tt)+) => { $crate::__gate_emit!(Info, $logger, $context, $($arg)+) };
}

#[macro_export]
macro_rules! gate_warn {
    ($logger:expr, $context:expr, $($arg:tt)+) => { $crate::__gate_emit!(Warn, $logger, $context, $($arg)+) };
}

#[macro_export]
macro_rules! gate_error {
    ($logger:expr, $context:expr, $($arg:tt)+) => { $crate::__gate_emit!(Error, $logger, $context, $($arg)+) };
}

#[cfg(test)]
mod tests {
    use crate::{LevelGatedLogger, MemorySink, Severity};
    use loggate_config::{StaticProvider, MAX_LOG_LEVEL_KEY};

    struct Listener {
        port: u16,
    }

    impl Listener {
        fn announce(&self, logger: &LevelGatedLogger<StaticProvider, MemorySink>) {
            gate_info!(logger, self, "listening on {}", self.port);
            gate_debug!(logger, self, "backlog {}", 128);
        }
    }

    #[test]
    fn macros_format_and_tag() {
        let logger = LevelGatedLogger::new(
            StaticProvider::new().with(MAX_LOG_LEVEL_KEY, "I"),
            MemorySink::new(),
        );
        Listener { port: 8080 }.announce(&logger);
        gate_error!(logger, &Listener { port: 1 }, "closed");

        let records = logger.sink().records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tag, "Listener");
        assert_eq!(records[0].message, "listening on 8080");
        assert_eq!(records[1].severity, Severity::Error);
        assert_eq!(records[1].message, "closed");
    }
}
