//! Atlas export formats.
//!
//! The raster itself is written as PNG by [`FinalizedAtlas`](crate::FinalizedAtlas);
//! this module provides the accompanying layout data.

pub mod metadata;
pub mod raw;

pub use metadata::AtlasMetadata;
pub use raw::{export_raw, RawAtlasData};
