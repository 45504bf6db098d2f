//! Batch serializers for each output format.
//!
//! A serializer is chosen once per run and turns batches into bytes. The
//! header (if the format has one) is produced separately so the writer can
//! emit it exactly once.

use order_core::{Batch, OrderRecord, OutputFormat};
use serde::Serialize;
use serde_json::value::RawValue;
use std::io::Write;

/// Error produced while serializing a batch into memory.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns batches into bytes for one output format.
pub trait BatchSerializer {
    fn format(&self) -> OutputFormat;

    /// Append the header, if this format has one.
    fn write_header(&self, out: &mut Vec<u8>) -> Result<(), SerializeError>;

    /// Append every record of `batch`, one terminated line per record.
    fn write_rows(&self, batch: &Batch, out: &mut Vec<u8>) -> Result<(), SerializeError>;
}

/// Select the serializer for `format`.
pub fn serializer_for(format: OutputFormat, include_symbol: bool) -> Box<dyn BatchSerializer> {
    match format {
        OutputFormat::Delimited => Box::new(DelimitedSerializer::new(include_symbol)),
        OutputFormat::Lines => Box::new(LinesSerializer::new(include_symbol)),
    }
}

/// Comma-delimited rows with a header of field names.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedSerializer {
    include_symbol: bool,
}

impl DelimitedSerializer {
    pub fn new(include_symbol: bool) -> Self {
        Self { include_symbol }
    }

    fn writer<'a>(&self, out: &'a mut Vec<u8>) -> csv::Writer<&'a mut Vec<u8>> {
        csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(out)
    }
}

impl BatchSerializer for DelimitedSerializer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Delimited
    }

    fn write_header(&self, out: &mut Vec<u8>) -> Result<(), SerializeError> {
        let mut writer = self.writer(out);
        writer.write_record(OrderRecord::field_names(self.include_symbol))?;
        writer.flush()?;
        Ok(())
    }

    fn write_rows(&self, batch: &Batch, out: &mut Vec<u8>) -> Result<(), SerializeError> {
        let mut writer = self.writer(out);
        for record in batch {
            writer.write_field(record.id.to_string())?;
            if self.include_symbol {
                writer.write_field(record.symbol.as_deref().unwrap_or_default())?;
            }
            writer.write_field(record.side.as_str())?;
            writer.write_field(record.price.to_string())?;
            writer.write_field(record.quantity.to_string())?;
            writer.write_field(record.order_type.as_str())?;
            writer.write_record(None::<&[u8]>)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// One JSON object per line.
#[derive(Debug, Clone, Copy)]
pub struct LinesSerializer {
    include_symbol: bool,
}

/// JSON shape of a record. Field order matches the delimited header.
#[derive(Serialize)]
struct LineRecord<'a> {
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<&'a str>,
    side: &'static str,
    /// Written verbatim so the number keeps exactly two fractional digits
    price: Box<RawValue>,
    quantity: u32,
    #[serde(rename = "type")]
    order_type: &'static str,
}

impl LinesSerializer {
    pub fn new(include_symbol: bool) -> Self {
        Self { include_symbol }
    }

    fn to_line_record<'a>(
        &self,
        record: &'a OrderRecord,
    ) -> Result<LineRecord<'a>, SerializeError> {
        Ok(LineRecord {
            id: record.id,
            symbol: if self.include_symbol {
                Some(record.symbol.as_deref().unwrap_or_default())
            } else {
                None
            },
            side: record.side.as_str(),
            price: RawValue::from_string(record.price.to_string())?,
            quantity: record.quantity,
            order_type: record.order_type.as_str(),
        })
    }
}

impl BatchSerializer for LinesSerializer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Lines
    }

    fn write_header(&self, _out: &mut Vec<u8>) -> Result<(), SerializeError> {
        Ok(())
    }

    fn write_rows(&self, batch: &Batch, out: &mut Vec<u8>) -> Result<(), SerializeError> {
        for record in batch {
            let line = self.to_line_record(record)?;
            serde_json::to_writer(&mut *out, &line)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
