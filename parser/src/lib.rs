#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]
#![warn(missing_docs, unused_qualifications)]

//! This crate works on top of `dicoview-encoding` to provide a data set
//! parser and serializer for the dicoview DICOM engine.
//!
//! A data set is interpreted as a stream of [tokens](dataset::DataToken):
//! [`DataSetReader`](dataset::DataSetReader) decodes a byte buffer into
//! that stream, and [`DataSetWriter`](dataset::DataSetWriter) encodes the
//! stream back into bytes. Building an in-memory tree out of the token
//! stream is the business of the `dicoview-object` crate.

pub mod dataset;

pub use crate::dataset::{DataSetReader, DataSetWriter, DataToken};
