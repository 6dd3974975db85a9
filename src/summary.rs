//! Short human-readable summary of `git status` output.

use std::fmt;

/// Counts derived from status text.
///
/// `files_changed` is the number of status lines, not a true file count, and
/// the added/removed counters count lines *mentioning* "inserted" or
/// "deleted" rather than summing the numbers on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSummary {
    pub files_changed: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl ChangeSummary {
    pub fn from_status(status: &str) -> Self {
        let mut summary = ChangeSummary::default();

        for line in status.lines() {
            summary.files_changed += 1;
            if line.contains("inserted") {
                summary.lines_added += 1;
            } else if line.contains("deleted") {
                summary.lines_removed += 1;
            }
        }

        summary
    }

    pub fn total_lines(&self) -> usize {
        self.lines_added + self.lines_removed
    }

    /// "added" only when strictly more lines were added than removed.
    pub fn label(&self) -> &'static str {
        if self.lines_added > self.lines_removed {
            "added"
        } else {
            "removed"
        }
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) changed, {} lines {}",
            self.files_changed,
            self.total_lines(),
            self.label()
        )
    }
}
