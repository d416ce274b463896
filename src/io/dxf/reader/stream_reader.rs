//! DXF stream reader trait and common types

use crate::error::Result;

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// Trimmed value line
    pub value: String,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Get value as string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get value as integer
    pub fn as_i32(&self) -> Option<i32> {
        self.value.trim().parse::<i32>().ok()
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }

    /// Check for a record marker (`0 / name`), case-insensitively
    pub fn is_marker(&self, name: &str) -> bool {
        self.code == 0 && self.value.eq_ignore_ascii_case(name)
    }
}

/// Cursor over DXF code/value pairs with single-pair lookahead
pub trait DxfStreamReader {
    /// Read the next code/value pair, `None` at end of input
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Look at the next pair without consuming it
    fn peek_pair(&mut self) -> Result<Option<&DxfCodePair>>;

    /// Peek at the next code without consuming it
    fn peek_code(&mut self) -> Result<Option<i32>> {
        Ok(self.peek_pair()?.map(|pair| pair.code))
    }

    /// 1-based number of the last line consumed from the input
    fn line_number(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_accessors() {
        let pair = DxfCodePair::new(70, " 42 ");
        assert_eq!(pair.as_i32(), Some(42));
        assert_eq!(DxfCodePair::new(10, "1.5").as_double(), Some(1.5));
        assert_eq!(DxfCodePair::new(10, "abc").as_double(), None);
    }

    #[test]
    fn test_is_marker() {
        assert!(DxfCodePair::new(0, "EndSec").is_marker("ENDSEC"));
        assert!(!DxfCodePair::new(2, "ENDSEC").is_marker("ENDSEC"));
    }
}
