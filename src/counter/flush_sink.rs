use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use crate::error::{Result, ServiceError};

/// Destination for flush records. Implementations append one record per call.
pub trait FlushSink: Send {
    fn write_record(&mut self, count: u64) -> Result<()>;
}

/// formats a flush record exactly as it appears in the log file
pub fn format_record(count: u64) -> String {
    format!("Unique requests received for the minute: {}\n", count)
}

/// Flush sink over any writer. Each record is flushed to the writer before
/// `write_record` returns.
pub struct WriterSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> WriterSink<W> {
        WriterSink { writer }
    }

    /// unwraps the sink, returning the writer with every record written so far
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<File> {
    /// opens (creating if missing) the append-only unique request log
    pub fn open_log_file(path: &Path) -> Result<WriterSink<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| ServiceError::OpenLog {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(WriterSink::new(file))
    }
}

impl<W: Write + Send> FlushSink for WriterSink<W> {
    fn write_record(&mut self, count: u64) -> Result<()> {
        self.writer
            .write_all(format_record(count).as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(ServiceError::SinkWrite)
    }
}
