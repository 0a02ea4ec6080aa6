//! crates/severity/src/levels.rs
//! Severity descriptors and the built-in level set.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Code of the built-in [`DEBUG`] severity.
pub const DEBUG_CODE: u32 = 100;
/// Code of the built-in [`INFO`] severity.
pub const INFO_CODE: u32 = 300;
/// Code of the built-in [`WARNING`] severity.
pub const WARNING_CODE: u32 = 500;
/// Code of the built-in [`FATAL`] severity.
pub const FATAL_CODE: u32 = 1000;

/// Verbose diagnostics intended for developers.
pub const DEBUG: LevelDescriptor = LevelDescriptor::new(DEBUG_CODE, "DEBUG");
/// Routine operational messages.
pub const INFO: LevelDescriptor = LevelDescriptor::new(INFO_CODE, "INFO");
/// Recoverable problems worth an operator's attention.
pub const WARNING: LevelDescriptor = LevelDescriptor::new(WARNING_CODE, "WARNING");
/// Unrecoverable conditions. Whether the process terminates is decided by the
/// logging pipeline, not by the registry.
pub const FATAL: LevelDescriptor = LevelDescriptor::new(FATAL_CODE, "FATAL");

/// Levels a fresh or reset registry starts with, all enabled, ascending by code.
pub const DEFAULT_LEVELS: [LevelDescriptor; 4] = [DEBUG, INFO, WARNING, FATAL];

/// A severity: an integer code paired with a display name.
///
/// Codes are the addressing key. Two descriptors may share a name, and a
/// registry slot is located purely by [`code`](Self::code). Descriptors are
/// immutable; re-registering a code replaces the stored descriptor rather than
/// editing it.
///
/// # Examples
///
/// ```
/// use severity::{LevelDescriptor, WARNING};
///
/// let notice = LevelDescriptor::with_name(400, "NOTICE");
/// assert!(notice.code() < WARNING.code());
/// assert_eq!(notice.to_string(), "NOTICE");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDescriptor {
    code: u32,
    name: Cow<'static, str>,
}

impl LevelDescriptor {
    /// Creates a descriptor from a static name. Usable in `const` items.
    #[must_use]
    pub const fn new(code: u32, name: &'static str) -> Self {
        Self {
            code,
            name: Cow::Borrowed(name),
        }
    }

    /// Creates a descriptor from an owned or borrowed name.
    #[must_use]
    pub fn with_name(code: u32, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// Returns the numeric code.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this descriptor addressed at `code`.
    #[must_use]
    pub fn with_code(&self, code: u32) -> Self {
        Self {
            code,
            name: self.name.clone(),
        }
    }

    /// Reports whether the severity is at or above [`FATAL`].
    ///
    /// The registry never acts on this; the sink that decides whether to abort
    /// after writing a record does.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.code >= FATAL_CODE
    }
}

impl fmt::Display for LevelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Error returned when a name does not match a built-in severity.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown severity level: {name}")]
pub struct ParseLevelError {
    name: String,
}

impl ParseLevelError {
    /// Returns the rejected input.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for LevelDescriptor {
    type Err = ParseLevelError;

    /// Parses one of the built-in names, ignoring ASCII case and surrounding
    /// whitespace. `WARN` is accepted for [`WARNING`].
    ///
    /// Custom severities have no global name table; resolve them through
    /// `LevelRegistry::find` instead.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let level = if trimmed.eq_ignore_ascii_case("debug") {
            DEBUG
        } else if trimmed.eq_ignore_ascii_case("info") {
            INFO
        } else if trimmed.eq_ignore_ascii_case("warning") || trimmed.eq_ignore_ascii_case("warn") {
            WARNING
        } else if trimmed.eq_ignore_ascii_case("fatal") {
            FATAL
        } else {
            return Err(ParseLevelError {
                name: trimmed.to_owned(),
            });
        };
        Ok(level)
    }
}
