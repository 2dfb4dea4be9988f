//! Audit report generator.
//!
//! Takes the forest plus the audit result and produces a human-readable
//! summary with folder counts, timings, and the locked-out cow ids.

use corral_core::{CowId, Forest};
use std::collections::HashSet;
use std::time::Duration;

/// Aggregated result of one audit run.
#[derive(Debug)]
pub struct AuditReport {
    pub total_cows: u64,
    pub total_folders: usize,
    pub shared_folders: usize,
    pub confidential_folders: usize,
    pub leaf_count: usize,
    /// Uncool cow ids, sorted for stable display.
    pub uncool: Vec<CowId>,
    pub read_time: Duration,
    pub total_time: Duration,
}

impl AuditReport {
    /// Build a report from the forest and the computed uncool set.
    pub fn build(
        forest: &Forest,
        leaf_count: usize,
        uncool: &HashSet<CowId>,
        read_time: Duration,
        total_time: Duration,
    ) -> Self {
        let shared_folders = forest.folders().filter(|f| f.is_shared()).count();

        let mut uncool: Vec<CowId> = uncool.iter().copied().collect();
        uncool.sort_unstable();

        AuditReport {
            total_cows: forest.total_cows(),
            total_folders: forest.len(),
            shared_folders,
            confidential_folders: forest.len() - shared_folders,
            leaf_count,
            uncool,
            read_time,
            total_time,
        }
    }

    /// Render the report as a formatted string.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push('\n');
        out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
        out.push_str("║                     CORRAL AUDIT REPORT                      ║\n");
        out.push_str("╠══════════════════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Cows:               {:>38} ║\n", self.total_cows));
        out.push_str(&format!(
            "║  Folders:            {:>38} ║\n",
            self.total_folders
        ));
        out.push_str(&format!(
            "║  Shared:             {:>38} ║\n",
            self.shared_folders
        ));
        out.push_str(&format!(
            "║  Confidential:       {:>38} ║\n",
            self.confidential_folders
        ));
        out.push_str(&format!("║  Leaves:             {:>38} ║\n", self.leaf_count));
        out.push_str(&format!(
            "║  Uncool cows:        {:>38} ║\n",
            self.uncool.len()
        ));
        out.push_str(&format!(
            "║  Read time:          {:>35?} ║\n",
            self.read_time
        ));
        out.push_str(&format!(
            "║  Total time:         {:>35?} ║\n",
            self.total_time
        ));
        out.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        if self.uncool.is_empty() {
            out.push_str("║  Every cow reaches every leaf folder.                        ║\n");
        } else {
            out.push_str("║  LOCKED OUT                                                  ║\n");
            for chunk in self.uncool.chunks(8) {
                let ids = chunk
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                out.push_str(&format!("║    {:<57} ║\n", ids));
            }
        }

        out.push_str("╚══════════════════════════════════════════════════════════════╝\n");
        out
    }
}
