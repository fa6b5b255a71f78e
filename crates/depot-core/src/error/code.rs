//! Stable, namespaced error codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// Prefix of every code owned by depot-core.
pub const CORE_PREFIX: &str = "DPT";

/// A namespaced error identifier such as `DPT0003`.
///
/// Codes are append-only history: once a number has been handed out under a
/// prefix it is never reassigned, even after the error kind it named is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode {
    prefix: &'static str,
    number: u16,
}

impl ErrorCode {
    /// Reserved for the internal-error fallback.
    pub const INTERNAL: ErrorCode = ErrorCode::core(0);

    /// Create a code under an arbitrary prefix.
    ///
    /// Panics (at compile time when used in a `const`/`static`) if the number
    /// does not fit in four digits or the prefix is empty.
    pub const fn new(prefix: &'static str, number: u16) -> Self {
        assert!(!prefix.is_empty(), "error code prefix must not be empty");
        assert!(number <= 9999, "error codes are four digits");
        Self { prefix, number }
    }

    /// Create a code under the core `DPT` prefix.
    pub const fn core(number: u16) -> Self {
        Self::new(CORE_PREFIX, number)
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn is_internal(&self) -> bool {
        *self == Self::INTERNAL
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
