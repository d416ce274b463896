//! DXF (Drawing Exchange Format) reading

pub mod pair_container;
mod reader;

pub use pair_container::{PairContainer, SUBCLASS_MARKER};
pub use reader::{
    DxfCodePair, DxfReader, DxfReaderConfiguration, DxfStreamReader, DxfTextReader, SectionReader,
};
