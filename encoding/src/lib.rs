#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]
#![warn(missing_docs, unused_qualifications)]

//! This crate contains the encoding and decoding primitives of the
//! dicoview DICOM engine: an endian-aware byte cursor, text codecs for the
//! DICOM character repertoires, the transfer syntax registry, and the
//! element header codecs for the implicit and explicit VR wire forms.

pub mod cursor;
pub mod decode;
pub mod encode;
pub mod text;
pub mod transfer_syntax;

pub use crate::cursor::{ByteCursor, ByteWriter};
pub use crate::text::{SpecificCharacterSet, TextCodec};
pub use crate::transfer_syntax::{PixelAlgorithm, TransferSyntax};

pub use byteordered::Endianness;
