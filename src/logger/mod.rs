//! Outcome sinks: where finished run records go

mod file;

pub use file::FileLogger;

use crate::error::Result;
use crate::record::LogRecord;

/// Narrow contract the runner needs from a log destination.
pub trait LogSink {
    /// Buffer one record for the next flush.
    fn add(&mut self, record: LogRecord);

    /// Write everything buffered. Errors propagate to the caller unchanged.
    fn flush(&mut self) -> Result<()>;
}

/// Sink that keeps records in memory.
///
/// Meant for tests, including tests of application commands built on this
/// crate.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Vec<LogRecord>,
    flushed: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record added so far, flushed or not.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Number of records covered by a completed flush.
    pub fn flushed(&self) -> usize {
        self.flushed
    }
}

impl LogSink for MemoryLogger {
    fn add(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    fn flush(&mut self) -> Result<()> {
        self.flushed = self.records.len();
        Ok(())
    }
}
