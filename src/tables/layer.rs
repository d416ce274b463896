//! Layer table entry

use super::TableEntry;
use crate::types::DEFAULT_COLOR_INDEX;

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Standard flags (code 70)
    pub flags: i32,
    /// Concrete color index in `1..=255`
    pub color: i16,
    /// Line type name, upper-cased
    pub line_type: String,
    /// Whether entities on this layer are drawn
    pub on: bool,
}

impl Layer {
    /// Create a layer from raw table values.
    ///
    /// A negative `raw_color` turns the layer off; the stored color is its
    /// magnitude. A layer cannot inherit its color, so the BYBLOCK and
    /// BYLAYER indices (and anything past 255) store the default color.
    pub fn new(name: impl Into<String>, flags: i32, raw_color: i16, line_type: &str) -> Self {
        let color = match raw_color.saturating_abs() {
            index @ 1..=255 => index,
            _ => DEFAULT_COLOR_INDEX,
        };
        Layer {
            name: name.into(),
            flags,
            color,
            line_type: line_type.to_uppercase(),
            on: raw_color >= 0,
        }
    }

    /// Layer used for entities whose layer is not in the table
    pub fn default_layer() -> Self {
        Layer::new("", 0, DEFAULT_COLOR_INDEX, super::linetype::CONTINUOUS)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }
}

impl TableEntry for Layer {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_color_turns_layer_off() {
        let layer = Layer::new("HIDDEN", 0, -3, "dashed");
        assert!(!layer.is_on());
        assert_eq!(layer.color, 3);
        assert_eq!(layer.line_type, "DASHED");
    }

    #[test]
    fn test_inheriting_color_index_becomes_default() {
        assert_eq!(Layer::new("A", 0, 0, "").color, DEFAULT_COLOR_INDEX);
        assert_eq!(Layer::new("B", 0, 256, "").color, DEFAULT_COLOR_INDEX);
        let off = Layer::new("C", 0, -256, "");
        assert_eq!(off.color, DEFAULT_COLOR_INDEX);
        assert!(!off.is_on());
    }

    #[test]
    fn test_default_layer() {
        let layer = Layer::default_layer();
        assert!(layer.is_on());
        assert_eq!(layer.color, 7);
        assert_eq!(layer.line_type, "CONTINUOUS");
    }
}
