//! Tokenizing line reader over any buffered async source.

use crate::{Record, RecordSource};
use async_trait::async_trait;
use corral_core::error::{CorralError, CorralResult};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Reads whitespace-tokenized records from a line-oriented source.
///
/// Reading stops at EOF or at the first blank line; anything after a
/// blank line is ignored.
///
/// ```ignore
/// let mut source = LineRecordSource::stdin();
/// let records = source.read_records().await?;
/// ```
pub struct LineRecordSource<R> {
    reader: R,
    label: String,
}

impl LineRecordSource<BufReader<Stdin>> {
    /// Read records from standard input.
    pub fn stdin() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            label: "<stdin>".to_string(),
        }
    }
}

impl LineRecordSource<BufReader<File>> {
    /// Read records from a file.
    pub async fn open(path: impl AsRef<Path>) -> CorralResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|e| {
            CorralError::Provider(format!("Failed to open {}: {e}", path.display()))
        })?;

        tracing::info!(path = %path.display(), "opened input file");

        Ok(Self {
            reader: BufReader::new(file),
            label: path.display().to_string(),
        })
    }
}

impl<R: AsyncBufRead + Unpin + Send> LineRecordSource<R> {
    /// Wrap any buffered async reader (tests use in-memory byte slices).
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            label: "<reader>".to_string(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> RecordSource for LineRecordSource<R> {
    async fn read_records(&mut self) -> CorralResult<Vec<Record>> {
        let mut records = Vec::new();
        let mut line = String::new();

        loop {
            line.clear();
            let n = self.reader.read_line(&mut line).await.map_err(|e| {
                CorralError::Provider(format!("Failed to read from {}: {e}", self.label))
            })?;
            if n == 0 {
                break;
            }

            let tokens: Record = line.split_ascii_whitespace().map(str::to_owned).collect();
            if tokens.is_empty() {
                // Blank line terminates the stream.
                break;
            }
            records.push(tokens);
        }

        tracing::debug!(records = records.len(), source = %self.label, "read records");
        Ok(records)
    }
}
