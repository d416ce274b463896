//! Line type table entry

use super::TableEntry;

/// Name of the solid line type
pub const CONTINUOUS: &str = "CONTINUOUS";

/// Line type token meaning "use the layer's line type"
pub const BY_LAYER: &str = "BYLAYER";

/// Line type token meaning "use the containing block's line type"
pub const BY_BLOCK: &str = "BYBLOCK";

/// A line type table entry
#[derive(Debug, Clone, PartialEq)]
pub struct LineType {
    /// Line type name, upper-cased
    pub name: String,
    /// Description (code 3), an ASCII sketch of the pattern such as `__ . __`
    pub description: String,
    /// Standard flags (code 70)
    pub flags: i32,
    /// Complex line type flags (code 74)
    pub complex_flags: i32,
    /// Declared number of pattern items (code 73)
    pub item_count: usize,
    /// Pattern element lengths (code 49), at most `item_count` of them
    pub elements: Vec<f64>,
    /// Total pattern length (code 40)
    pub pattern_length: f64,
}

impl LineType {
    /// Create a line type with no pattern
    pub fn new(name: &str) -> Self {
        LineType {
            name: name.to_uppercase(),
            description: String::new(),
            flags: 0,
            complex_flags: 0,
            item_count: 0,
            elements: Vec::new(),
            pattern_length: 0.0,
        }
    }

    /// The standard solid line type
    pub fn continuous() -> Self {
        LineType::new(CONTINUOUS)
    }

    /// True when the pattern has no items
    pub fn is_continuous(&self) -> bool {
        self.item_count == 0
    }

    /// Build an on/off dash array from the description, each value times `scale`.
    ///
    /// The trimmed description is padded with a space to an even length and
    /// every character contributes one (on, off) pair.
    pub fn dash_array(&self, scale: f64) -> Vec<f64> {
        let mut pattern: Vec<char> = self.description.trim().chars().collect();
        if pattern.len() % 2 != 0 {
            pattern.push(' ');
        }

        pattern
            .into_iter()
            .flat_map(|c| {
                let (on, off) = match c {
                    ' ' => (0.0, 10.0),
                    '.' => (1.0, 3.0),
                    '-' => (5.0, 3.0),
                    '_' => (10.0, 0.0),
                    _ => (3.0, 3.0),
                };
                [on * scale, off * scale]
            })
            .collect()
    }
}

impl Default for LineType {
    fn default() -> Self {
        Self::continuous()
    }
}

impl TableEntry for LineType {
    fn name(&self) -> &str {
        &self.name
    }
}
