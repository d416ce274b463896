//! DXF ASCII text reader

use super::stream_reader::{DxfCodePair, DxfStreamReader};
use crate::error::{DxfError, Result};
use encoding_rs::Encoding;
use std::io::BufRead;
use tracing::warn;

/// DXF ASCII text reader
///
/// Reads alternating code and value lines and keeps at most one pair of
/// lookahead. A code line that is not an integer fails with
/// [`DxfError::MalformedStream`] carrying its 1-based line number.
pub struct DxfTextReader<R: BufRead> {
    reader: R,
    line_number: usize,
    peeked_pair: Option<DxfCodePair>,
    /// Non-UTF8 fallback encoding.  `None` means use Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
}

impl<R: BufRead> DxfTextReader<R> {
    /// Create a new DXF text reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            peeked_pair: None,
            encoding: None,
        }
    }

    /// Decode non-UTF8 lines with `encoding` instead of Latin-1
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Read a single trimmed line, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => {
                let bytes = err.into_bytes();
                match self.encoding {
                    Some(enc) => enc.decode(&bytes).0.into_owned(),
                    // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
                    None => bytes.iter().map(|&b| b as char).collect(),
                }
            }
        };

        Ok(Some(line.trim().to_string()))
    }

    /// Read a code/value pair from the stream
    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let code_line_number = self.line_number;

        let code = code_line
            .parse::<i32>()
            .map_err(|_| DxfError::MalformedStream {
                line: code_line_number,
            })?;

        let value = match self.read_line()? {
            Some(line) => line,
            None => {
                // A dangling code line is treated as the end of input.
                warn!(code, line = code_line_number, "input ends inside a code/value pair");
                return Ok(None);
            }
        };

        Ok(Some(DxfCodePair::new(code, process_string_value(&value))))
    }
}

/// Process special character sequences in DXF strings
fn process_string_value(value: &str) -> String {
    if !value.contains('^') {
        return value.to_string();
    }
    value
        .replace("^J", "\n")
        .replace("^M", "\r")
        .replace("^I", "\t")
        .replace("^ ", "^")
}

impl<R: BufRead> DxfStreamReader for DxfTextReader<R> {
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }
        self.read_pair_internal()
    }

    fn peek_pair(&mut self) -> Result<Option<&DxfCodePair>> {
        if self.peeked_pair.is_none() {
            self.peeked_pair = self.read_pair_internal()?;
        }
        Ok(self.peeked_pair.as_ref())
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}
