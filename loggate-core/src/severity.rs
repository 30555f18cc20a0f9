//! Severity tiers and the configured ceiling.
//!
//! Ranks grow with verbosity: `Error` is the lowest tier and `Trace` the
//! highest, with `MaxLevel::None` below every tier. A record passes the gate
//! when its rank does not exceed the ceiling's rank.

use std::fmt;
use std::str::FromStr;

use crate::error::LogError;

/// Severity of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// All tiers, most verbose first.
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Numeric rank. Not contiguous; only the order is meaningful.
    pub const fn rank(self) -> i32 {
        match self {
            Severity::Error => 3,
            Severity::Warn => 4,
            Severity::Info => 6,
            Severity::Debug => 7,
            Severity::Trace => 100,
        }
    }

    /// Single-letter code as used in configuration (`V` for trace).
    pub const fn code(self) -> &'static str {
        match self {
            Severity::Trace => "V",
            Severity::Debug => "D",
            Severity::Info => "I",
            Severity::Warn => "W",
            Severity::Error => "E",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Parses a tier code. `NONE` is a ceiling, not a tier, and is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V" => Ok(Severity::Trace),
            "D" => Ok(Severity::Debug),
            "I" => Ok(Severity::Info),
            "W" => Ok(Severity::Warn),
            "E" => Ok(Severity::Error),
            other => Err(LogError::InvalidSeverityName(other.to_string())),
        }
    }
}

/// The most verbose tier a process lets through, or `None` for silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl MaxLevel {
    pub const fn rank(self) -> i32 {
        match self {
            MaxLevel::None => -1,
            MaxLevel::Error => Severity::Error.rank(),
            MaxLevel::Warn => Severity::Warn.rank(),
            MaxLevel::Info => Severity::Info.rank(),
            MaxLevel::Debug => Severity::Debug.rank(),
            MaxLevel::Trace => Severity::Trace.rank(),
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            MaxLevel::None => "NONE",
            MaxLevel::Error => "E",
            MaxLevel::Warn => "W",
            MaxLevel::Info => "I",
            MaxLevel::Debug => "D",
            MaxLevel::Trace => "V",
        }
    }

    /// Whether a record of `severity` passes under this ceiling.
    #[inline]
    pub const fn permits(self, severity: Severity) -> bool {
        severity.rank() <= self.rank()
    }
}

impl From<Severity> for MaxLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Trace => MaxLevel::Trace,
            Severity::Debug => MaxLevel::Debug,
            Severity::Info => MaxLevel::Info,
            Severity::Warn => MaxLevel::Warn,
            Severity::Error => MaxLevel::Error,
        }
    }
}

impl fmt::Display for MaxLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for MaxLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(MaxLevel::None),
            tier => tier.parse::<Severity>().map(MaxLevel::from),
        }
    }
}
