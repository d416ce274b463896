//! DXF file reader

mod section_reader;
mod stream_reader;
mod text_reader;

pub use section_reader::SectionReader;
pub use stream_reader::{DxfCodePair, DxfStreamReader};
pub use text_reader::DxfTextReader;

use crate::document::Document;
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Configuration for the DXF reader.
#[derive(Debug, Clone)]
pub struct DxfReaderConfiguration {
    /// Drop entities flagged as paper space (code 67 = 1) while reading.
    ///
    /// Default: `true`.
    pub ignore_paper_space: bool,

    /// When `true`, the pairs enclosed by two code-102 control strings are
    /// left out of every record.
    ///
    /// Default: `false`.
    pub return_control_strings: bool,

    /// Record per-kind read/ignored/unsupported counts on the document.
    ///
    /// Default: `true`.
    pub collect_statistics: bool,
}

impl Default for DxfReaderConfiguration {
    fn default() -> Self {
        Self {
            ignore_paper_space: true,
            return_control_strings: false,
            collect_statistics: true,
        }
    }
}

/// DXF file reader
pub struct DxfReader {
    reader: Box<dyn DxfStreamReader>,
    config: DxfReaderConfiguration,
}

impl DxfReader {
    /// Create a new DXF reader over buffered text
    pub fn new<R: BufRead + 'static>(reader: R) -> Self {
        Self::from_stream(Box::new(DxfTextReader::new(reader)))
    }

    /// Create a new DXF reader from any reader
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }

    /// Create a DXF reader whose non-UTF8 lines are decoded with `encoding`
    pub fn with_encoding<R: BufRead + 'static>(reader: R, encoding: &'static Encoding) -> Self {
        Self::from_stream(Box::new(DxfTextReader::new(reader).with_encoding(encoding)))
    }

    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }

    /// Create a DXF reader over an existing pair cursor
    pub fn from_stream(reader: Box<dyn DxfStreamReader>) -> Self {
        Self {
            reader,
            config: DxfReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn configuration(&self) -> &DxfReaderConfiguration {
        &self.config
    }

    /// Read the whole stream and return a document ready to flatten
    pub fn read(mut self) -> Result<Document> {
        let mut document = Document::new();
        self.read_into(&mut document)?;
        Ok(document)
    }

    /// Read the whole stream into `document`.
    ///
    /// On failure the document keeps whatever was read before the error and
    /// stays in the parsing phase. Any cause other than a malformed stream
    /// comes back wrapped in [`DxfError::Reader`].
    pub fn read_into(&mut self, document: &mut Document) -> Result<()> {
        self.read_sections(document)
            .map_err(DxfError::into_reader_error)?;
        document.finish_parsing()?;

        debug!(
            entities = document.entity_count(),
            blocks = document.block_names().count(),
            layers = document.layer_names().count(),
            "finished reading DXF"
        );
        Ok(())
    }

    fn read_sections(&mut self, document: &mut Document) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("EOF") {
                break;
            }
            if !pair.is_marker("SECTION") {
                continue;
            }

            let name = match self.reader.read_pair()? {
                Some(name_pair) if name_pair.code == 2 => name_pair.value.to_uppercase(),
                Some(_) => continue,
                None => break,
            };
            debug!(section = %name, line = self.reader.line_number(), "reading section");

            let mut section = SectionReader::new(self.reader.as_mut(), &self.config, document);
            match name.as_str() {
                "HEADER" => section.read_header()?,
                "TABLES" => section.read_tables()?,
                "BLOCKS" => section.read_blocks()?,
                "ENTITIES" => section.read_entities()?,
                "CLASSES" | "OBJECTS" => section.skip_section()?,
                _ => {
                    section.skip_section()?;
                    document.notifications.reading(
                        NotificationType::NotImplemented,
                        format!("{name} section skipped"),
                    );
                }
            }
        }
        Ok(())
    }
}
