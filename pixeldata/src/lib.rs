#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]
#![warn(missing_docs, unused_qualifications)]

//! This crate turns parsed DICOM data sets into usable images
//! for the dicoview engine.
//!
//! The [pixel pipeline](pipeline::PixelPipeline) slices or reassembles
//! frames out of the Pixel Data element (native or encapsulated),
//! dispatching compressed frames to an external
//! [frame decoder](pipeline::FrameDecoder), and the
//! [image factory](image::ImageFactory) assembles the final [`Image`]
//! with its [geometry](geometry::Geometry), rescale information and
//! metadata.

pub mod attribute;
pub mod geometry;
pub mod image;
pub mod pipeline;

pub use crate::geometry::{Geometry, Matrix33, Point3, Size, Spacing, Vector3};
pub use crate::image::{FrameBuffer, Image, ImageFactory, ImageMeta, Rsi};
pub use crate::pipeline::{
    AbortHandle, DecodeError, FrameDecoder, FrameInfo, PipelineObserver, PixelPipeline,
};
