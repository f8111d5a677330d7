//! # Filter gate.
//!
//! [`Threshold`] holds the current verbosity limit in an atomic cell so that every
//! emission can read it without taking a lock.

use std::sync::atomic::{AtomicU8, Ordering};

use super::Level;

/// Current threshold, shared by all emitters.
#[derive(Debug)]
pub struct Threshold {
    rank: AtomicU8,
}

impl Threshold {
    /// Creates a gate admitting `level` and everything more severe.
    pub fn new(level: Level) -> Self {
        Self {
            rank: AtomicU8::new(level.verbosity()),
        }
    }

    /// Replaces the threshold.
    pub fn set(&self, level: Level) {
        self.rank.store(level.verbosity(), Ordering::Relaxed);
    }

    /// Returns the current threshold.
    pub fn get(&self) -> Level {
        Level::from_rank(self.rank.load(Ordering::Relaxed))
    }

    /// True iff an entry at `level` should be delivered.
    ///
    /// [`Level::Wtf`] and [`Level::Info`] always pass.
    #[inline]
    pub fn passes(&self, level: Level) -> bool {
        level.is_unconditional() || level.verbosity() <= self.rank.load(Ordering::Relaxed)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_warning() {
        assert_eq!(Threshold::default().get(), Level::Warning);
    }

    #[test]
    fn test_warning_threshold() {
        let gate = Threshold::new(Level::Warning);
        assert!(gate.passes(Level::Fatal));
        assert!(gate.passes(Level::Error));
        assert!(gate.passes(Level::Warning));
        assert!(!gate.passes(Level::Debug));
        assert!(!gate.passes(Level::Verbose));
    }

    #[test]
    fn test_unconditional_levels_ignore_threshold() {
        let gate = Threshold::new(Level::Wtf);
        assert!(gate.passes(Level::Wtf));
        assert!(gate.passes(Level::Info));
        assert!(!gate.passes(Level::Fatal));

        for level in Level::ALL {
            gate.set(level);
            assert!(gate.passes(Level::Wtf), "threshold {level}");
            assert!(gate.passes(Level::Info), "threshold {level}");
        }
    }

    #[test]
    fn test_set_verbose_admits_everything() {
        let gate = Threshold::default();
        gate.set(Level::Verbose);
        assert_eq!(gate.get(), Level::Verbose);
        assert!(Level::ALL.iter().all(|l| gate.passes(*l)));
    }
}
