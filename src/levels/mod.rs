//! Severity levels and the threshold gate.
//!
//! - [`Level`]: ordered severities with name/ordinal conversions.
//! - [`Threshold`]: admits or rejects an entry by level.

mod gate;
mod level;

pub use gate::Threshold;
pub use level::Level;
