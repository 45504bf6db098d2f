//! Append-only batch writer.
//!
//! Each batch is serialized into a reusable in-memory buffer and then handed
//! to the sink in one `write_all` followed by a flush. The sink therefore only
//! ever sees whole batches from this writer, and the committed row count always
//! sits on a batch boundary.

use crate::error::PopulatorError;
use crate::serializer::{BatchSerializer, SerializeError};
use order_core::{Batch, OutputFormat};
use std::io::Write;
use tracing::debug;

/// Writes serialized batches to a sink the caller opened.
pub struct StreamWriter<W: Write> {
    sink: W,
    serializer: Box<dyn BatchSerializer>,
    /// `(total_rows, warmup_rows)` for the optional leading metadata line
    metadata: Option<(u64, u64)>,
    /// Whether the metadata line and header are still to be written
    preamble_pending: bool,
    buffer: Vec<u8>,
    rows_committed: u64,
    batches_committed: u64,
    bytes_committed: u64,
    peak_batch_bytes: usize,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(sink: W, serializer: Box<dyn BatchSerializer>) -> Self {
        Self {
            sink,
            serializer,
            metadata: None,
            preamble_pending: true,
            buffer: Vec::new(),
            rows_committed: 0,
            batches_committed: 0,
            bytes_committed: 0,
            peak_batch_bytes: 0,
        }
    }

    /// Prepend a `<total_rows>,<warmup_rows>` line before the header.
    pub fn with_metadata_line(mut self, total_rows: u64, warmup_rows: u64) -> Self {
        self.metadata = Some((total_rows, warmup_rows));
        self
    }

    /// Set whether the metadata line and header are written with the first
    /// batch. Disable when appending to a sink that already has them.
    pub fn with_preamble(mut self, write_preamble: bool) -> Self {
        self.preamble_pending = write_preamble;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.serializer.format()
    }

    /// Serialize `batch` and append it to the sink.
    ///
    /// The batch is consumed and dropped before the sink write so that at most
    /// one batch of records and one serialized buffer are alive at a time.
    pub fn write_batch(&mut self, batch: Batch) -> Result<(), PopulatorError> {
        let rows = batch.len() as u64;
        let is_first_batch = self.preamble_pending;

        self.buffer.clear();
        self.serialize_into_buffer(&batch, is_first_batch)
            .map_err(|source| PopulatorError::Serialize {
                rows_committed: self.rows_committed,
                source,
            })?;
        drop(batch);

        let sink_error = |source: std::io::Error| PopulatorError::SinkWrite {
            rows_committed: self.rows_committed,
            source,
        };
        self.sink.write_all(&self.buffer).map_err(sink_error)?;
        self.sink.flush().map_err(sink_error)?;

        self.preamble_pending = false;
        self.rows_committed += rows;
        self.batches_committed += 1;
        self.bytes_committed += self.buffer.len() as u64;
        self.peak_batch_bytes = self.peak_batch_bytes.max(self.buffer.len());

        debug!(
            "Committed batch of {} rows ({} bytes), {} rows total",
            rows,
            self.buffer.len(),
            self.rows_committed
        );
        Ok(())
    }

    fn serialize_into_buffer(
        &mut self,
        batch: &Batch,
        is_first_batch: bool,
    ) -> Result<(), SerializeError> {
        if is_first_batch {
            if let Some((total_rows, warmup_rows)) = self.metadata {
                writeln!(self.buffer, "{total_rows},{warmup_rows}")?;
            }
            self.serializer.write_header(&mut self.buffer)?;
        }
        self.serializer.write_rows(batch, &mut self.buffer)
    }

    /// Rows fully written and flushed to the sink.
    pub fn rows_committed(&self) -> u64 {
        self.rows_committed
    }

    pub fn batches_committed(&self) -> u64 {
        self.batches_committed
    }

    /// Serialized bytes handed to the sink (before any compression).
    pub fn bytes_committed(&self) -> u64 {
        self.bytes_committed
    }

    /// Size of the largest single serialized batch, preamble included.
    pub fn peak_batch_bytes(&self) -> usize {
        self.peak_batch_bytes
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::{serializer_for, DelimitedSerializer, LinesSerializer};
    use order_core::{GenerationMode, OrderRecord, OrderType, Price, Side};
    use std::io;

    fn batch(start_id: u64, count: u64) -> Batch {
        let records = (start_id..start_id + count)
            .map(|id| OrderRecord {
                id,
                symbol: None,
                side: Side::Sell,
                price: Price::from_cents(1001),
                quantity: 5,
                order_type: OrderType::Limit,
            })
            .collect();
        Batch::new(GenerationMode::LimitOnly, records)
    }

    /// Accepts `limit` bytes and then fails every write.
    struct FailingSink {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::other("disk full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_header_written_once() {
        let mut writer = StreamWriter::new(Vec::new(), Box::new(DelimitedSerializer::new(false)));
        writer.write_batch(batch(1, 2)).unwrap();
        writer.write_batch(batch(3, 2)).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            output,
            "id,side,price,quantity,type\n\
             1,SELL,10.01,5,LIMIT\n\
             2,SELL,10.01,5,LIMIT\n\
             3,SELL,10.01,5,LIMIT\n\
             4,SELL,10.01,5,LIMIT\n"
        );
    }

    #[test]
    fn test_metadata_line_precedes_header() {
        let mut writer = StreamWriter::new(Vec::new(), serializer_for(OutputFormat::Delimited, false))
            .with_metadata_line(25, 10);
        writer.write_batch(batch(1, 1)).unwrap();
        writer.write_batch(batch(2, 1)).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "25,10");
        assert_eq!(lines[1], "id,side,price,quantity,type");
        assert_eq!(lines.len(), 4);
        assert_eq!(output.matches("25,10").count(), 1);
    }

    #[test]
    fn test_lines_have_no_header() {
        let mut writer = StreamWriter::new(Vec::new(), Box::new(LinesSerializer::new(false)));
        writer.write_batch(batch(1, 3)).unwrap();
        writer.write_batch(batch(4, 3)).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let ids: Vec<u64> = output
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_without_preamble() {
        let mut writer = StreamWriter::new(Vec::new(), Box::new(DelimitedSerializer::new(false)))
            .with_metadata_line(10, 0)
            .with_preamble(false);
        writer.write_batch(batch(7, 1)).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "7,SELL,10.01,5,LIMIT\n");
    }

    #[test]
    fn test_sink_failure_reports_committed_rows() {
        let sink = FailingSink {
            written: Vec::new(),
            limit: 100,
        };
        let mut writer = StreamWriter::new(sink, Box::new(DelimitedSerializer::new(false)));

        // header (28 bytes) + 2 rows (21 bytes each) fits
        writer.write_batch(batch(1, 2)).unwrap();
        assert_eq!(writer.rows_committed(), 2);

        let err = writer.write_batch(batch(3, 5)).unwrap_err();
        assert!(matches!(
            err,
            PopulatorError::SinkWrite {
                rows_committed: 2,
                ..
            }
        ));
        assert_eq!(err.rows_committed(), 2);
        assert_eq!(writer.rows_committed(), 2);
    }

    #[test]
    fn test_counters() {
        let mut writer = StreamWriter::new(Vec::new(), Box::new(DelimitedSerializer::new(false)));
        writer.write_batch(batch(1, 3)).unwrap();
        writer.write_batch(batch(4, 1)).unwrap();

        assert_eq!(writer.rows_committed(), 4);
        assert_eq!(writer.batches_committed(), 2);
        let first_batch_bytes = 28 + 3 * 21;
        assert_eq!(writer.peak_batch_bytes(), first_batch_bytes);
        assert_eq!(writer.bytes_committed(), (first_batch_bytes + 21) as u64);
    }
}
