//! # dxf-flatten
//!
//! Reads DXF drawings and flattens their block tree into fully resolved 2D
//! vector primitives: segments, elliptical arcs, polylines and polygons,
//! each with a concrete color, a dash pattern, a world transform and a
//! stroke scale.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dxf_flatten::{io::dxf::DxfReader, render::FlattenOptions};
//!
//! let mut doc = DxfReader::from_file("sample.dxf")?.read()?;
//! let flattened = doc.flatten(&FlattenOptions::default())?;
//!
//! for item in &flattened.items {
//!     println!("{} in color {:?}", item.primitive.name(), item.color);
//! }
//! println!("{:?}", flattened.report);
//! # Ok::<(), dxf_flatten::error::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dxf`] - tag/value pair cursor and the section parser
//! - [`document`] - blocks, layers, line types and the entity arena, with
//!   a parsing → flattening → cleared lifecycle
//! - [`entities`] - the closed set of supported entity kinds
//! - [`geometry`] - bulge arcs, elliptical arc sampling, block placement
//! - [`render`] - color/line type resolution and the flattener
//!
//! Reading problems that do not stop the parse, and every flattening
//! problem, are collected as [`notification::Notification`]s on the
//! document.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod render;
pub mod statistics;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use document::{Block, Document, DocumentPhase, EntityId, MODEL_SPACE, PAPER_SPACE};
pub use error::{DxfError, Result};
pub use io::{DxfReader, DxfReaderConfiguration};
pub use render::{FlattenOptions, FlattenReport, Flattened, Primitive, RenderItem};
pub use types::{Color, DistanceUnit, Transform2D, Vector2, Vector3};

// Re-export entity types
pub use entities::{Entity, EntityKind, EntityType};

use std::io::BufRead;

/// Read a whole DXF stream with the default configuration
pub fn read_document<R: BufRead + 'static>(reader: R) -> Result<Document> {
    DxfReader::new(reader).read()
}
