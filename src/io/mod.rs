//! I/O module for reading DXF drawings

pub mod dxf;

pub use dxf::{DxfReader, DxfReaderConfiguration};
