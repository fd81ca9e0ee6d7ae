//! This crate serves as a parent for the library crates of the dicoview
//! project, a DICOM file-format engine.
//!
//! For parsing and writing DICOM files, see [`object`];
//! for turning parsed data sets into images, see [`pixeldata`].

pub use dicoview_core as core;
pub use dicoview_encoding as encoding;
pub use dicoview_object as object;
pub use dicoview_parser as parser;
pub use dicoview_pixeldata as pixeldata;
