//! # loggate-core
//!
//! A level-gated logging facade. Each call reads the process's configured
//! ceiling, compares it with the record's severity and, when permitted,
//! forwards the record to a sink under a tag derived from the caller's type.
//!
//! ### Key Submodules:
//! - `severity`: tiers, their ranks and the configured ceiling
//! - `tag`: type-name tags with a fixed fallback
//! - `sink`: the output backend seam and an in-memory recorder
//! - `gate`: the gate and its per-tier entry points
//!
//! ```
//! use loggate_config::{StaticProvider, MAX_LOG_LEVEL_KEY};
//! use loggate_core::{LevelGatedLogger, MemorySink};
//!
//! struct Uploader;
//!
//! let logger = LevelGatedLogger::new(
//!     StaticProvider::new().with(MAX_LOG_LEVEL_KEY, "I"),
//!     MemorySink::new(),
//! );
//! logger.info(&Uploader, "started");
//! logger.debug(&Uploader, "chunk 1 of 40");
//!
//! let records = logger.sink().records();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].tag, "Uploader");
//! ```

mod macros;

pub mod error;
pub mod gate;
pub mod severity;
pub mod sink;
pub mod tag;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::gate::*;
    pub use crate::severity::*;
    pub use crate::sink::*;
    pub use crate::tag::*;
}

pub use error::LogError;
pub use gate::{LevelGatedLogger, DIAGNOSTIC_TAG};
pub use severity::{MaxLevel, Severity};
pub use sink::{render_failure, Failure, LogSink, MemorySink, Record};
pub use tag::{Tag, FALLBACK_TAG};
