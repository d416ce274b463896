//! DXF text builders for integration tests.
//!
//! `DxfBuilder` writes group-code/value lines the way a DXF file lays them
//! out, so tests can describe a drawing section by section without keeping
//! long string literals in sync.

#![allow(dead_code)]

use std::fmt::Display;

/// Incremental writer for ASCII DXF text
#[derive(Debug, Default, Clone)]
pub struct DxfBuilder {
    text: String,
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One code/value pair, code right-aligned like most writers do
    pub fn pair(mut self, code: i32, value: impl Display) -> Self {
        self.text.push_str(&format!("{code:>3}\n{value}\n"));
        self
    }

    pub fn pairs(self, pairs: &[(i32, &str)]) -> Self {
        pairs.iter().fold(self, |b, &(code, value)| b.pair(code, value))
    }

    pub fn section(self, name: &str) -> Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(self) -> Self {
        self.pair(0, "ENDSEC")
    }

    pub fn header_f64(self, variable: &str, code: i32, value: f64) -> Self {
        self.pair(9, variable).pair(code, value)
    }

    pub fn header_str(self, variable: &str, value: &str) -> Self {
        self.pair(9, variable).pair(1, value)
    }

    pub fn table(self, name: &str) -> Self {
        self.pair(0, "TABLE").pair(2, name)
    }

    pub fn end_table(self) -> Self {
        self.pair(0, "ENDTAB")
    }

    pub fn layer(self, name: &str, color: i16, line_type: &str) -> Self {
        self.pair(0, "LAYER")
            .pair(2, name)
            .pair(70, 0)
            .pair(62, color)
            .pair(6, line_type)
    }

    pub fn line_type(self, name: &str, description: &str, elements: &[f64]) -> Self {
        let b = self
            .pair(0, "LTYPE")
            .pair(2, name)
            .pair(70, 0)
            .pair(3, description)
            .pair(72, 65)
            .pair(73, elements.len())
            .pair(40, elements.iter().map(|e| e.abs()).sum::<f64>());
        elements.iter().fold(b, |b, e| b.pair(49, e))
    }

    pub fn block(self, name: &str) -> Self {
        self.pair(0, "BLOCK")
            .pair(8, "0")
            .pair(2, name)
            .pair(70, 0)
            .pair(10, 0.0)
            .pair(20, 0.0)
    }

    pub fn end_block(self) -> Self {
        self.pair(0, "ENDBLK")
    }

    /// Open an entity record with its common properties
    pub fn entity(self, kind: &str, layer: &str, color: Option<i16>) -> Self {
        let b = self.pair(0, kind).pair(8, layer);
        match color {
            Some(color) => b.pair(62, color),
            None => b,
        }
    }

    pub fn line(self, layer: &str, color: Option<i16>, from: (f64, f64), to: (f64, f64)) -> Self {
        self.entity("LINE", layer, color)
            .pair(10, from.0)
            .pair(20, from.1)
            .pair(11, to.0)
            .pair(21, to.1)
    }

    pub fn circle(self, layer: &str, center: (f64, f64), radius: f64) -> Self {
        self.entity("CIRCLE", layer, None)
            .pair(10, center.0)
            .pair(20, center.1)
            .pair(40, radius)
    }

    pub fn insert(self, block: &str, color: Option<i16>, at: (f64, f64), scale: f64) -> Self {
        self.entity("INSERT", "0", color)
            .pair(2, block)
            .pair(10, at.0)
            .pair(20, at.1)
            .pair(41, scale)
            .pair(42, scale)
    }

    /// LWPOLYLINE from `(x, y, bulge)` triples
    pub fn lwpolyline(self, layer: &str, closed: bool, vertices: &[(f64, f64, f64)]) -> Self {
        let b = self
            .entity("LWPOLYLINE", layer, None)
            .pair(90, vertices.len())
            .pair(70, if closed { 1 } else { 0 });
        vertices.iter().fold(b, |b, &(x, y, bulge)| {
            let b = b.pair(10, x).pair(20, y);
            if bulge != 0.0 {
                b.pair(42, bulge)
            } else {
                b
            }
        })
    }

    /// Finish the file
    pub fn build(self) -> String {
        self.pair(0, "EOF").text
    }

    /// Text so far, without the EOF marker
    pub fn partial(self) -> String {
        self.text
    }
}

/// A file with only an ENTITIES section filled by `f`
pub fn entities_only(f: impl FnOnce(DxfBuilder) -> DxfBuilder) -> String {
    f(DxfBuilder::new().section("ENTITIES")).end_section().build()
}
