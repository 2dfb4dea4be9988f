//! NDJSON (newline-delimited JSON) stream sink.
//!
//! Each row is serialized directly to the writer without intermediate
//! `String` allocation.
//!
//! ```ignore
//! let mut sink = JsonStreamSink::stdout();
//! sink.write_summary(&summary)?;
//! sink.write_uncool(&rows)?;
//! ```

use super::{AuditSummaryRow, UncoolCowRow};
use std::io::{self, BufWriter, Write};

/// NDJSON writer over any `Write`, buffered for batch I/O.
pub struct JsonStreamSink<W: Write> {
    writer: BufWriter<W>,
    rows_written: usize,
}

impl JsonStreamSink<io::Stdout> {
    /// Write NDJSON to stdout.
    pub fn stdout() -> Self {
        Self {
            writer: BufWriter::with_capacity(64 * 1024, io::stdout()),
            rows_written: 0,
        }
    }
}

impl<W: Write> JsonStreamSink<W> {
    /// Create a sink wrapping any writer (file, Vec<u8>, etc.).
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(64 * 1024, writer),
            rows_written: 0,
        }
    }

    /// Write one audit summary row.
    pub fn write_summary(&mut self, row: &AuditSummaryRow) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, row)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        self.writer.write_all(b"\n")?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write all uncool-cow rows.
    pub fn write_uncool(&mut self, rows: &[UncoolCowRow]) -> io::Result<()> {
        for row in rows {
            serde_json::to_writer(&mut self.writer, row)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            self.writer.write_all(b"\n")?;
            self.rows_written += 1;
        }
        Ok(())
    }

    /// Flush and return how many rows were written.
    pub fn finish(mut self) -> io::Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }

    /// Number of rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}
