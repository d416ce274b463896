//! Color and line type resolution through block and layer indirection

use crate::document::{Block, Document};
use crate::entities::EntityCommon;
use crate::tables::linetype::{BY_BLOCK, BY_LAYER, CONTINUOUS};
use crate::tables::LineType;
use crate::types::{Color, DEFAULT_COLOR_INDEX};

/// Properties a block passes down to its direct children.
///
/// A BYBLOCK child takes `color` and `line_type` from the context of the
/// block it sits in. Each nested block gets a fresh context from the entity
/// that references it, so resolution never looks further than one level up.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionContext {
    /// Color of the referencing entity
    pub color: Color,
    /// Line type name of the referencing entity; `None` is continuous
    pub line_type: Option<String>,
    /// Color forced onto every child of the current block
    pub color_override: Option<Color>,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        ResolutionContext {
            color: Color::Index(DEFAULT_COLOR_INDEX as u8),
            line_type: None,
            color_override: None,
        }
    }
}

impl ResolutionContext {
    /// Context passed down by an entity that draws a block
    pub fn inherited(color: Color, line_type: Option<String>) -> Self {
        ResolutionContext {
            color,
            line_type,
            color_override: None,
        }
    }

    /// The same context with `block`'s property override in force
    pub fn for_block(&self, block: &Block) -> Self {
        ResolutionContext {
            color_override: block.property_override,
            ..self.clone()
        }
    }

    /// Concrete color of an entity.
    ///
    /// An active override replaces the entity's own color. BYBLOCK then
    /// takes the context color and BYLAYER the layer's color.
    pub fn resolve_color(&self, document: &Document, common: &EntityCommon) -> Color {
        match self.color_override.unwrap_or(common.color) {
            Color::ByBlock => self.color,
            Color::ByLayer => Color::from_index(document.layer(&common.layer).color),
            color => color,
        }
    }

    /// Line type of an entity, CONTINUOUS when the name is unknown
    pub fn resolve_line_type<'d>(&self, document: &'d Document, common: &EntityCommon) -> &'d LineType {
        let name = common.line_type.as_str();
        if name.eq_ignore_ascii_case(BY_LAYER) {
            document.line_type(&document.layer(&common.layer).line_type)
        } else if name.eq_ignore_ascii_case(BY_BLOCK) {
            document.line_type(self.line_type.as_deref().unwrap_or(CONTINUOUS))
        } else {
            document.line_type(name)
        }
    }
}

/// Dash array for an entity drawn with `line_type`, empty when continuous
pub fn dash_pattern(document: &Document, line_type: &LineType, common: &EntityCommon) -> Vec<f64> {
    if line_type.is_continuous() {
        return Vec::new();
    }
    line_type.dash_array(document.line_type_scale() * common.line_type_scale)
}
