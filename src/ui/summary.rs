//! One-line cycle summary

use crate::types::CycleStats;
use indicatif::{HumanBytes, HumanDuration};
use std::time::Duration;

/// Summarize a finished cycle
///
/// `next` is the pause before the following cycle, if one is scheduled.
pub fn format_cycle_summary(stats: &CycleStats, next: Option<Duration>) -> String {
    let mut line = format!(
        "Done! {} copied ({}), {} deleted",
        stats.copied,
        HumanBytes(stats.bytes_copied),
        stats.deleted
    );

    if stats.dirs_created > 0 {
        line.push_str(&format!(", {} folder(s) created", stats.dirs_created));
    }
    if stats.retained_empty_dirs > 0 {
        line.push_str(&format!(
            ", {} empty folder(s) kept",
            stats.retained_empty_dirs
        ));
    }
    if stats.problems() > 0 {
        line.push_str(&format!(", {} skipped", stats.problems()));
    }

    line.push_str(&format!(" in {}", HumanDuration(stats.duration)));

    if let Some(next) = next {
        line.push_str(&format!(". Next sync in {}", HumanDuration(next)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_cycle() {
        let stats = CycleStats::default();
        let line = format_cycle_summary(&stats, None);

        assert!(line.starts_with("Done! 0 copied (0 B), 0 deleted"));
        assert!(!line.contains("skipped"));
        assert!(!line.contains("Next sync"));
    }

    #[test]
    fn test_busy_cycle() {
        let stats = CycleStats {
            copied: 3,
            bytes_copied: 2048,
            deleted: 1,
            dirs_created: 2,
            retained_empty_dirs: 1,
            skipped: 1,
            source_missing: 1,
            duration: Duration::from_secs(2),
        };
        let line = format_cycle_summary(&stats, Some(Duration::from_secs(30)));

        assert!(line.contains("3 copied (2.00 KiB)"));
        assert!(line.contains("1 deleted"));
        assert!(line.contains("2 folder(s) created"));
        assert!(line.contains("1 empty folder(s) kept"));
        assert!(line.contains("2 skipped"));
        assert!(line.contains("Next sync in 30 seconds"));
    }
}
