//! Output file handling: path derivation, creation or append, and gzip.
//!
//! The populator only sees a [`Write`] sink; everything about files and
//! compression lives here.

use flate2::write::GzEncoder;
use flate2::Compression;
use order_core::GenerationConfig;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for output writing (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Default output name: `synthetic_order_book_<rows>.<ext>`, plus `.gz` when compressed.
pub fn default_output_path(config: &GenerationConfig) -> PathBuf {
    let mut name = format!(
        "synthetic_order_book_{}.{}",
        config.total_rows,
        config.format.extension()
    );
    if config.compressed {
        name.push_str(".gz");
    }
    PathBuf::from(name)
}

/// An open output file, optionally gzip-compressed.
pub enum OutputSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

/// Result of opening an output file.
pub struct OpenedOutput {
    pub sink: OutputSink,
    /// The file existed with content before it was opened for append
    pub had_content: bool,
}

impl OutputSink {
    /// Open `path` for writing, truncating it unless `append` is set.
    pub fn open(path: &Path, compressed: bool, append: bool) -> io::Result<OpenedOutput> {
        let (file, had_content) = if append {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let had_content = file.metadata()?.len() > 0;
            (file, had_content)
        } else {
            (File::create(path)?, false)
        };

        let buffered = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let sink = if compressed {
            // Appending adds a new gzip member, which decoders read as one stream.
            OutputSink::Gzip(GzEncoder::new(buffered, Compression::default()))
        } else {
            OutputSink::Plain(buffered)
        };

        Ok(OpenedOutput { sink, had_content })
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, OutputSink::Gzip(_))
    }

    /// Write any trailer and flush everything to the file.
    pub fn finish(self) -> io::Result<()> {
        match self {
            OutputSink::Plain(mut writer) => writer.flush(),
            OutputSink::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Plain(writer) => writer.write(buf),
            OutputSink::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Plain(writer) => writer.flush(),
            OutputSink::Gzip(encoder) => encoder.flush(),
        }
    }
}
