#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]
#![warn(missing_docs, unused_qualifications)]

//! This crate contains a high-level abstraction for reading and
//! manipulating DICOM files in the dicoview engine.
//!
//! A whole file lives in a [`FileDataSet`]: the preamble, the File Meta
//! group, and the data set proper as an ordered map of data elements
//! ([`DataSet`]). Parsing consumes an in-memory byte buffer; writing
//! produces one, optionally transformed by a table of per-element
//! [rules](rules::RuleSet).

pub mod file;
pub mod mem;
pub mod meta;
pub mod rules;

pub use crate::file::{FileDataSet, ParseOptions};
pub use crate::mem::{DataSet, InMemElement};
pub use crate::rules::{Action, RuleSet};
