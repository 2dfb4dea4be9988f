//! Input-source abstraction for the Corral access auditor.

pub mod text;

use async_trait::async_trait;
use corral_core::error::CorralResult;

pub use text::LineRecordSource;

/// One non-blank input line, split on ASCII whitespace.
pub type Record = Vec<String>;

/// Abstraction for reading token records from any source.
#[async_trait]
pub trait RecordSource: Send {
    async fn read_records(&mut self) -> CorralResult<Vec<Record>>;
}
