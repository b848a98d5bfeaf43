//! Output side of the pipelines: where projected records go.

use std::io::{self, Write};

use thiserror::Error;

use crate::projection::ProjectedRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write records: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Consumer of projected records (a file, a table loader, a dataframe
/// builder). Called once per batch; batches may be empty.
pub trait RecordSink {
    /// # Errors
    ///
    /// Implementation-defined; [`JsonLinesSink`] fails on I/O or encoding.
    fn write_records(&mut self, records: &[ProjectedRecord]) -> Result<(), SinkError>;
}

/// Writes one compact JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Records written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_records(&mut self, records: &[ProjectedRecord]) -> Result<(), SinkError> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        self.written += records.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::projection::FieldMapping;

    #[test]
    fn writes_one_line_per_record() {
        let mapping = FieldMapping::compile(&[("id", "id"), ("price", "price.amount")]).unwrap();
        let records = mapping.project_all(&[
            json!({"id": 1, "price": {"amount": 1500}}),
            json!({"id": 2}),
        ]);

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_records(&records).unwrap();
        assert_eq!(sink.written(), 2);

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "{\"id\":1,\"price\":1500}\n{\"id\":2,\"price\":null}\n"
        );
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_records(&[]).unwrap();
        assert_eq!(sink.written(), 0);
        assert!(sink.into_inner().is_empty());
    }
}
