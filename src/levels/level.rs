//! # Severity levels and their name/ordinal conversions.
//!
//! [`Level`] is ordered by verbosity: a lower rank is more severe. The threshold
//! comparison in [`Threshold`](crate::levels::Threshold) relies on that ordering.
//!
//! ```text
//! Wtf < Info < Fatal < Error < Warning < Debug < Verbose
//! └─always─┘   └──────── compared against the threshold ───────┘
//! ```
//!
//! ## Conversions
//! - [`Level::from_name`]: case-insensitive, unknown names fall back to [`Level::Wtf`].
//! - [`Level::from_ordinal`]: indexes [`Level::ORDINALS`], out of range falls back to [`Level::Fatal`].
//!
//! Both conversions fail soft on purpose; neither returns an error.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Unconditional severity; always delivered regardless of the threshold.
    Wtf = 0,
    /// Messages intentionally shown to users; always delivered.
    Info = 1,
    /// Critical failure; the process terminates after logging.
    Fatal = 2,
    /// Unrecoverable failure for the caller.
    Error = 3,
    /// Default threshold.
    #[default]
    Warning = 4,
    /// Developer diagnostics.
    Debug = 5,
    /// Everything, including the facility's own housekeeping.
    Verbose = 6,
}

impl Level {
    /// Levels addressable by ordinal, in ascending verbosity.
    ///
    /// [`Level::Info`] is intentionally absent: it is an emit-side severity,
    /// not a threshold step.
    pub const ORDINALS: [Level; 6] = [
        Level::Wtf,
        Level::Fatal,
        Level::Error,
        Level::Warning,
        Level::Debug,
        Level::Verbose,
    ];

    /// Every level, in ascending verbosity.
    pub const ALL: [Level; 7] = [
        Level::Wtf,
        Level::Info,
        Level::Fatal,
        Level::Error,
        Level::Warning,
        Level::Debug,
        Level::Verbose,
    ];

    /// Canonical display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Wtf => "WTF",
            Level::Info => "INFO",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Debug => "DEBUG",
            Level::Verbose => "VERBOSE",
        }
    }

    /// Verbosity rank; lower is more severe.
    #[inline]
    pub const fn verbosity(self) -> u8 {
        self as u8
    }

    /// Returns true for levels that bypass the threshold.
    #[inline]
    pub const fn is_unconditional(self) -> bool {
        matches!(self, Level::Wtf | Level::Info)
    }

    /// Matches `name` case-insensitively against the canonical names.
    ///
    /// Returns [`Level::Wtf`] when nothing matches.
    ///
    /// # Example
    /// ```
    /// use logvisor::Level;
    ///
    /// assert_eq!(Level::from_name("VeRbOsE"), Level::Verbose);
    /// assert_eq!(Level::from_name("nope"), Level::Wtf);
    /// ```
    pub fn from_name(name: &str) -> Level {
        let name = name.trim();
        Level::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Level::Wtf)
    }

    /// Maps an index into [`Level::ORDINALS`].
    ///
    /// Returns [`Level::Fatal`] for negative or too large indices.
    ///
    /// # Example
    /// ```
    /// use logvisor::Level;
    ///
    /// assert_eq!(Level::from_ordinal(3), Level::Warning);
    /// assert_eq!(Level::from_ordinal(-1), Level::Fatal);
    /// assert_eq!(Level::from_ordinal(6), Level::Fatal);
    /// ```
    pub fn from_ordinal(i: i64) -> Level {
        usize::try_from(i)
            .ok()
            .and_then(|i| Level::ORDINALS.get(i).copied())
            .unwrap_or(Level::Fatal)
    }

    /// Inverse of [`Level::verbosity`]; used by the atomic threshold cell.
    pub(crate) fn from_rank(rank: u8) -> Level {
        Level::ALL
            .get(usize::from(rank))
            .copied()
            .unwrap_or(Level::Verbose)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Infallible;

    /// Same semantics as [`Level::from_name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::from_name(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip_any_case() {
        for level in Level::ALL {
            let name = level.as_str();
            assert_eq!(Level::from_name(name), level);
            assert_eq!(Level::from_name(&name.to_lowercase()), level);

            let mixed: String = name
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if i % 2 == 0 {
                        c.to_ascii_lowercase()
                    } else {
                        c
                    }
                })
                .collect();
            assert_eq!(Level::from_name(&mixed), level, "mixed case {mixed}");
        }
    }

    #[test]
    fn test_unknown_name_is_wtf() {
        assert_eq!(Level::from_name("Invalid"), Level::Wtf);
        assert_eq!(Level::from_name(""), Level::Wtf);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Wtf);
    }

    #[test]
    fn test_ordinals_in_range() {
        assert_eq!(Level::from_ordinal(0), Level::Wtf);
        assert_eq!(Level::from_ordinal(1), Level::Fatal);
        assert_eq!(Level::from_ordinal(2), Level::Error);
        assert_eq!(Level::from_ordinal(3), Level::Warning);
        assert_eq!(Level::from_ordinal(4), Level::Debug);
        assert_eq!(Level::from_ordinal(5), Level::Verbose);
    }

    #[test]
    fn test_ordinals_out_of_range_are_fatal() {
        for i in [-100, -1, 6, 7, 1_000, i64::MIN, i64::MAX] {
            assert_eq!(Level::from_ordinal(i), Level::Fatal, "ordinal {i}");
        }
    }

    #[test]
    fn test_verbosity_order() {
        let ranks: Vec<u8> = Level::ALL.iter().map(|l| l.verbosity()).collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert!(Level::Error < Level::Warning);
    }

    #[test]
    fn test_rank_roundtrip() {
        for level in Level::ALL {
            assert_eq!(Level::from_rank(level.verbosity()), level);
        }
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:<9}|", Level::Wtf), "WTF      |");
        assert_eq!(Level::Warning.to_string(), "WARNING");
    }
}
