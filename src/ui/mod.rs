//! Human-readable output

mod summary;

pub use summary::format_cycle_summary;
