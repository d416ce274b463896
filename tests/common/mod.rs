//! Shared test utilities for dxf-flatten integration tests.
//!
//! Every test crate imports these via `mod common;`. Drawings are built as
//! inline DXF text and read through an in-memory cursor.

#![allow(dead_code)]

pub mod builders;

use dxf_flatten::io::dxf::{DxfReader, DxfReaderConfiguration};
use dxf_flatten::render::{FlattenOptions, Flattened};
use dxf_flatten::types::Vector2;
use dxf_flatten::Document;
use std::io::Cursor;

/// Coordinate comparison tolerance for sampled geometry
pub const EPS: f64 = 1e-9;

pub fn reader(text: &str) -> DxfReader {
    DxfReader::new(Cursor::new(text.as_bytes().to_vec()))
}

/// Read DXF text with the default configuration
pub fn read(text: &str) -> anyhow::Result<Document> {
    Ok(reader(text).read()?)
}

pub fn read_with(text: &str, config: DxfReaderConfiguration) -> anyhow::Result<Document> {
    Ok(reader(text).with_configuration(config).read()?)
}

/// Read and flatten model space
pub fn flatten(text: &str) -> anyhow::Result<(Document, Flattened)> {
    let mut doc = read(text)?;
    let flattened = doc.flatten(&FlattenOptions::default())?;
    Ok((doc, flattened))
}

pub fn assert_close(actual: Vector2, expected: Vector2) {
    assert!(
        (actual.x - expected.x).abs() < 1e-6 && (actual.y - expected.y).abs() < 1e-6,
        "expected {expected:?}, got {actual:?}"
    );
}

pub fn assert_points_close(actual: &[Vector2], expected: &[Vector2]) {
    assert_eq!(actual.len(), expected.len(), "point count differs: {actual:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_close(*a, *e);
    }
}
