//! Color representation for drawing entities

use std::fmt;

/// Raw color index meaning "use the containing block's color"
pub const COLOR_BY_BLOCK: i16 = 0;

/// Raw color index meaning "use the layer's color"
pub const COLOR_BY_LAYER: i16 = 256;

/// Color used for a block's direct children before any reference sets one
pub const DEFAULT_COLOR_INDEX: i16 = 7;

/// Represents a color in AutoCAD
///
/// Colors are carried as AutoCAD Color Index (ACI) values. The two sentinel
/// indices are kept as distinct variants so that inheritance can be resolved
/// explicitly before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
}

impl Color {
    /// Create a color from an AutoCAD Color Index
    pub fn from_index(index: i16) -> Self {
        match index {
            COLOR_BY_BLOCK => Color::ByBlock,
            COLOR_BY_LAYER => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            // Negative means layer is off
            _ if index < 0 => Color::Index(index.unsigned_abs().min(255) as u8),
            _ => Color::Index(DEFAULT_COLOR_INDEX as u8),
        }
    }

    /// Get the raw color index
    pub fn index(&self) -> i16 {
        match self {
            Color::ByBlock => COLOR_BY_BLOCK,
            Color::ByLayer => COLOR_BY_LAYER,
            Color::Index(i) => *i as i16,
        }
    }

    /// Check whether this is one of the inheritance sentinels
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Color::ByBlock | Color::ByLayer)
    }

    pub const RED: Color = Color::Index(1);
    pub const YELLOW: Color = Color::Index(2);
    pub const GREEN: Color = Color::Index(3);
    pub const CYAN: Color = Color::Index(4);
    pub const BLUE: Color = Color::Index(5);
    pub const MAGENTA: Color = Color::Index(6);
    pub const WHITE: Color = Color::Index(7);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "ACI {}", i),
        }
    }
}
