#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces
)]
#![warn(missing_docs, unused_qualifications)]

//! This is the core library of the dicoview DICOM file-format engine.
//!
//! It contains the fundamental data structures for interacting with DICOM
//! data sets: attribute tags, value representations, value lengths, element
//! headers, element values, and the standard data dictionary.
//! The parsing and serialization machinery lives in the sibling crates
//! `dicoview-encoding`, `dicoview-parser` and `dicoview-object`.

pub mod dictionary;
pub mod header;
pub mod tags;
pub mod value;

pub use crate::dictionary::{DataDictionary, StandardDataDictionary};
pub use crate::header::{
    ByteSpan, DataElement, DataElementHeader, EmptyObject, HasLength, Header, Length, Tag, VR,
};
pub use crate::value::{DicomValueType, PrimitiveValue, Value};
