//! # Log entries and call-site tags.
//!
//! A [`LogEntry`] is built once per admitted emission and rendered to the string
//! that every endpoint receives:
//!
//! ```text
//! WARNING  fanout.rs:42	disk almost full
//! └─ level padded to 9 ─┘└─tag─┘ └─ message ─┘
//! ```

use std::fmt;
use std::panic::Location;

use crate::levels::Level;

/// Where an entry was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file as reported by the compiler.
    pub file: &'static str,
    /// 1-based line.
    pub line: u32,
}

impl CallSite {
    /// Explicit location, e.g. from `file!()` / `line!()`.
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Short tag: file name without directories, plus line.
    pub fn tag(&self) -> String {
        let name = self
            .file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file);
        format!("{name}:{}", self.line)
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(loc: &'static Location<'static>) -> Self {
        Self::new(loc.file(), loc.line())
    }
}

/// An admitted, immutable log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    level: Level,
    site: CallSite,
    message: String,
}

impl LogEntry {
    /// Creates a new entry.
    pub fn new(level: Level, site: CallSite, message: impl Into<String>) -> Self {
        Self {
            level,
            site,
            message: message.into(),
        }
    }

    /// Severity.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Emission site.
    pub fn site(&self) -> CallSite {
        self.site
    }

    /// Formatted message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the line delivered to listeners.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<9}{}\t{}", self.level, self.site.tag(), self.message)
    }
}
