//! Output sinks for audit results.
//!
//! Two row schemas:
//! - [`AuditSummaryRow`] -- one per audit run
//! - [`UncoolCowRow`] -- one per locked-out cow (denormalized)
//!
//! Two backends:
//! - **plain integer sink** ([`write_cow_ids`]) -- the canonical output:
//!   each id followed by a single space, no terminating newline
//! - **NDJSON stream** -- newline-delimited JSON rows to any `Write` impl

pub mod json_stream;

use corral_core::CowId;
use serde::Serialize;
use std::io::{self, Write};

// ---------------------------------------------------------------------------
// Serializable row types
// ---------------------------------------------------------------------------

/// One row per audit run -- summary statistics.
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummaryRow {
    pub total_cows: u64,
    pub total_folders: u32,
    pub shared_folders: u32,
    pub confidential_folders: u32,
    pub leaf_count: u32,
    pub uncool_count: u32,
    pub read_time_ms: u64,
    pub total_time_ms: u64,
    pub created_at: String,
}

/// One row per uncool cow -- append-only, fully denormalized.
#[derive(Debug, Clone, Serialize)]
pub struct UncoolCowRow {
    pub cow_id: CowId,
    pub total_cows: u64,
    pub leaf_count: u32,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Builder: Report → Rows
// ---------------------------------------------------------------------------

use crate::reporter::AuditReport;

impl AuditReport {
    /// Flatten the report into sink-ready rows.
    pub fn to_rows(&self) -> (AuditSummaryRow, Vec<UncoolCowRow>) {
        let now = chrono_now();

        let summary = AuditSummaryRow {
            total_cows: self.total_cows,
            total_folders: self.total_folders as u32,
            shared_folders: self.shared_folders as u32,
            confidential_folders: self.confidential_folders as u32,
            leaf_count: self.leaf_count as u32,
            uncool_count: self.uncool.len() as u32,
            read_time_ms: self.read_time.as_millis() as u64,
            total_time_ms: self.total_time.as_millis() as u64,
            created_at: now.clone(),
        };

        let uncool = self
            .uncool
            .iter()
            .map(|&cow_id| UncoolCowRow {
                cow_id,
                total_cows: self.total_cows,
                leaf_count: self.leaf_count as u32,
                created_at: now.clone(),
            })
            .collect();

        (summary, uncool)
    }
}

// ---------------------------------------------------------------------------
// Plain integer sink
// ---------------------------------------------------------------------------

/// Writes each id followed by a single space, with no terminating newline.
/// An empty iterator writes nothing at all.
pub fn write_cow_ids<W, I>(writer: &mut W, ids: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = CowId>,
{
    for id in ids {
        write!(writer, "{id} ")?;
    }
    writer.flush()
}

/// ISO-8601 timestamp without a chrono dependency.
fn chrono_now() -> String {
    use std::time::SystemTime;
    let d = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap();
    let secs = d.as_secs();
    format!(
        "{}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        1970 + secs / 31_536_000,
        (secs % 31_536_000) / 2_592_000 + 1,
        (secs % 2_592_000) / 86_400 + 1,
        (secs % 86_400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
    )
}
