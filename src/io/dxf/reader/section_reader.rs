//! DXF section readers

use super::stream_reader::{DxfCodePair, DxfStreamReader};
use super::DxfReaderConfiguration;
use crate::document::{is_reserved_block, Block, Document, MODEL_SPACE, PAPER_SPACE};
use crate::entities::{self, DecodeOutcome, EntityKind};
use crate::error::Result;
use crate::io::dxf::pair_container::parse_f64;
use crate::io::dxf::PairContainer;
use crate::notification::NotificationType;
use crate::statistics::{ParseContext, ParseOutcome};
use crate::tables::{Layer, LineType};
use crate::types::{DistanceUnit, Vector2, DEFAULT_COLOR_INDEX};
use tracing::{debug, warn};

/// Code that opens and closes an application control string group
const CONTROL_STRING: i32 = 102;

/// Which table the records being read belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Layer,
    LineType,
    /// Parsed positionally and dropped
    Other,
}

impl TableKind {
    fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("LAYER") {
            TableKind::Layer
        } else if name.eq_ignore_ascii_case("LTYPE") {
            TableKind::LineType
        } else {
            TableKind::Other
        }
    }
}

/// Reads the body of one section into the document
pub struct SectionReader<'a> {
    reader: &'a mut dyn DxfStreamReader,
    config: &'a DxfReaderConfiguration,
    document: &'a mut Document,
    /// Block receiving entities while inside BLOCK..ENDBLK
    open_block: Option<String>,
}

impl<'a> SectionReader<'a> {
    /// Create a new section reader
    pub fn new(
        reader: &'a mut dyn DxfStreamReader,
        config: &'a DxfReaderConfiguration,
        document: &'a mut Document,
    ) -> Self {
        Self {
            reader,
            config,
            document,
            open_block: None,
        }
    }

    /// Collect one record into `record`.
    ///
    /// A record is an optional `0/name` pair followed by every pair up to,
    /// not including, the next code 0. Returns the record name (empty when
    /// the record did not start with code 0), or `None` at end of input.
    fn read_record(&mut self, record: &mut PairContainer) -> Result<Option<String>> {
        record.clear();

        let name = match self.reader.peek_code()? {
            None => return Ok(None),
            Some(0) => self
                .reader
                .read_pair()?
                .map(|pair| pair.value)
                .unwrap_or_default(),
            Some(_) => String::new(),
        };

        let mut in_control_string = false;
        while let Some(code) = self.reader.peek_code()? {
            if code == 0 {
                break;
            }
            let pair = match self.reader.read_pair()? {
                Some(pair) => pair,
                None => break,
            };

            if pair.code == CONTROL_STRING && self.config.return_control_strings {
                in_control_string = !in_control_string;
                continue;
            }
            if in_control_string || pair.code < 0 {
                continue;
            }
            record.push(pair);
        }

        Ok(Some(name))
    }

    /// Consume pairs up to and including `0/ENDSEC`
    pub fn skip_section(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.is_marker("ENDSEC") {
                break;
            }
        }
        Ok(())
    }

    fn truncated(&mut self, section: &str) {
        warn!(section, line = self.reader.line_number(), "input ends inside section");
        self.document.notifications.reading(
            NotificationType::Warning,
            format!("Input ends inside the {section} section"),
        );
    }

    // ===== HEADER =====

    /// Read the HEADER section
    pub fn read_header(&mut self) -> Result<()> {
        let mut record = PairContainer::new();
        while let Some(name) = self.read_record(&mut record)? {
            if name.eq_ignore_ascii_case("ENDSEC") {
                return Ok(());
            }
            self.read_header_variables(&record)?;
        }
        self.truncated("HEADER");
        Ok(())
    }

    /// Apply every recognised `9/$NAME` variable in `record`; each takes its
    /// value from the pair or pairs that follow it.
    fn read_header_variables(&mut self, record: &PairContainer) -> Result<()> {
        let mut pairs = record.iter();
        while let Some(pair) = pairs.next() {
            if pair.code != 9 {
                continue;
            }

            let variable = pair.value.to_uppercase();
            match variable.as_str() {
                "$DIMBLK" | "$DIMBLK1" | "$DIMBLK2" => {
                    if let Some(value) = pairs.next() {
                        self.document.add_arrow_block(value.as_str())?;
                    }
                }
                "$INSUNITS" => match pairs.next().and_then(DxfCodePair::as_i32) {
                    Some(code) => self.document.header_mut()?.distance_unit = DistanceUnit::from_code(code),
                    None => self.bad_header_value(&variable),
                },
                "$LTSCALE" => match pairs.next().and_then(DxfCodePair::as_double) {
                    Some(scale) => self.document.header_mut()?.line_type_scale = scale,
                    None => self.bad_header_value(&variable),
                },
                "$LIMMIN" | "$LIMMAX" => {
                    let x = pairs.next().and_then(DxfCodePair::as_double);
                    let y = pairs.next().and_then(DxfCodePair::as_double);
                    match (x, y) {
                        (Some(x), Some(y)) => {
                            let header = self.document.header_mut()?;
                            if variable == "$LIMMIN" {
                                header.limits_min = Vector2::new(x, y);
                            } else {
                                header.limits_max = Vector2::new(x, y);
                            }
                        }
                        _ => self.bad_header_value(&variable),
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn bad_header_value(&mut self, variable: &str) {
        warn!(variable, "unreadable header value");
        self.document.notifications.reading(
            NotificationType::Warning,
            format!("Header variable {variable} has an unreadable value"),
        );
    }

    // ===== TABLES =====

    /// Read the TABLES section. Only LAYER and LTYPE entries are kept.
    pub fn read_tables(&mut self) -> Result<()> {
        let mut record = PairContainer::new();
        let mut table = TableKind::Other;

        while let Some(name) = self.read_record(&mut record)? {
            if name.eq_ignore_ascii_case("ENDSEC") {
                return Ok(());
            } else if name.eq_ignore_ascii_case("TABLE") {
                table = TableKind::from_name(record.value_or(2, ""));
                debug!(table = record.value_or(2, ""), "reading table");
            } else if name.eq_ignore_ascii_case("ENDTAB") {
                table = TableKind::Other;
            } else {
                match table {
                    TableKind::Layer => self.read_layer(&record)?,
                    TableKind::LineType => self.read_line_type(&record)?,
                    TableKind::Other => {}
                }
            }
        }
        self.truncated("TABLES");
        Ok(())
    }

    fn read_layer(&mut self, record: &PairContainer) -> Result<()> {
        let raw_color = i16::try_from(record.i32_or(62, DEFAULT_COLOR_INDEX as i32))
            .unwrap_or(DEFAULT_COLOR_INDEX);
        let layer = Layer::new(
            record.value_or(2, ""),
            record.i32_or(70, 0),
            raw_color,
            record.value_or(6, crate::tables::linetype::CONTINUOUS),
        );
        self.document.add_layer(layer)
    }

    fn read_line_type(&mut self, record: &PairContainer) -> Result<()> {
        let mut line_type = LineType::new(record.value_or(2, ""));
        line_type.flags = record.i32_or(70, 0);
        line_type.complex_flags = record.i32_or(74, 0);
        line_type.description = record.value_or(3, "").to_string();
        line_type.item_count = record.i32_or(73, 0).max(0) as usize;
        line_type.pattern_length = record.f64_or(40, 0.0);
        line_type.elements = record
            .values(49)
            .filter_map(parse_f64)
            .take(line_type.item_count)
            .collect();
        self.document.add_line_type(line_type)
    }

    // ===== BLOCKS =====

    /// Read the BLOCKS section
    pub fn read_blocks(&mut self) -> Result<()> {
        let mut record = PairContainer::new();
        while let Some(name) = self.read_record(&mut record)? {
            if name.eq_ignore_ascii_case("ENDSEC") {
                self.open_block = None;
                return Ok(());
            } else if name.eq_ignore_ascii_case("BLOCK") {
                self.begin_block(&record)?;
            } else if name.eq_ignore_ascii_case("ENDBLK") {
                self.open_block = None;
            } else {
                self.read_entity(&name, &record, true)?;
            }
        }
        self.truncated("BLOCKS");
        Ok(())
    }

    /// Open a block definition. The two root names reuse the existing root
    /// blocks; any other name registers a new block.
    fn begin_block(&mut self, record: &PairContainer) -> Result<()> {
        let name = record.value_or(2, "").to_string();

        if is_reserved_block(&name) {
            let root = if name.eq_ignore_ascii_case(MODEL_SPACE) {
                MODEL_SPACE
            } else {
                PAPER_SPACE
            };
            self.open_block = Some(root.to_string());
            return Ok(());
        }

        let mut block = Block::new(name.clone());
        block.base_point = Vector2::new(record.f64_or(10, 0.0), record.f64_or(20, 0.0));
        block.flags = record.i32_or(70, 0);
        self.document.add_block(block)?;
        self.open_block = Some(name);
        Ok(())
    }

    // ===== ENTITIES =====

    /// Read the ENTITIES section
    pub fn read_entities(&mut self) -> Result<()> {
        let mut record = PairContainer::new();
        while let Some(name) = self.read_record(&mut record)? {
            if name.eq_ignore_ascii_case("ENDSEC") {
                return Ok(());
            }
            self.read_entity(&name, &record, false)?;
        }
        self.truncated("ENTITIES");
        Ok(())
    }

    /// Decode one entity record and place it.
    ///
    /// Vertex and face records go to their container. Anything else goes to
    /// the open block in block context, or to the model or paper space root.
    fn read_entity(&mut self, name: &str, record: &PairContainer, block_context: bool) -> Result<()> {
        let kind = EntityKind::from_name(name);
        let context = if block_context {
            ParseContext::Block
        } else if record.i32_or(67, 0) != 0 {
            ParseContext::PaperSpace
        } else {
            ParseContext::ModelSpace
        };

        let entity = match entities::decode(kind, record, self.config.ignore_paper_space) {
            DecodeOutcome::Decoded(entity) => entity,
            DecodeOutcome::Empty => return Ok(()),
            DecodeOutcome::Unsupported => {
                debug!(record = name, "unsupported entity skipped");
                self.count(kind, context, ParseOutcome::Unsupported);
                return Ok(());
            }
            DecodeOutcome::Discarded => {
                self.count(kind, context, ParseOutcome::Ignored);
                return Ok(());
            }
        };
        let kind = entity.kind();

        let entity = match entity.into_vertex_record() {
            Ok(vertex) => {
                let outcome = if self.document.attach_vertex(vertex)? {
                    ParseOutcome::Read
                } else {
                    ParseOutcome::Ignored
                };
                self.count(kind, context, outcome);
                return Ok(());
            }
            Err(entity) => entity,
        };

        let target = match context {
            ParseContext::Block => match self.open_block.clone() {
                Some(block) => block,
                None => {
                    debug!(record = name, "entity outside any block definition dropped");
                    self.count(kind, context, ParseOutcome::Ignored);
                    return Ok(());
                }
            },
            ParseContext::PaperSpace if self.config.ignore_paper_space => {
                self.count(kind, context, ParseOutcome::Ignored);
                return Ok(());
            }
            ParseContext::PaperSpace => PAPER_SPACE.to_string(),
            ParseContext::ModelSpace => MODEL_SPACE.to_string(),
        };

        self.document.add_entity(&target, entity)?;
        self.count(kind, context, ParseOutcome::Read);
        Ok(())
    }

    fn count(&mut self, kind: EntityKind, context: ParseContext, outcome: ParseOutcome) {
        if self.config.collect_statistics {
            self.document.statistics.record(kind, context, outcome);
        }
    }
}
