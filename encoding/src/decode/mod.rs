//! This module contains the element header decoders:
//! one per wire form (explicit VR and implicit VR),
//! both operating over a [`ByteCursor`](crate::cursor::ByteCursor)
//! whose byte order matches the transfer syntax in effect.

pub mod explicit;
pub mod implicit;

use crate::cursor::ByteCursor;
use dicoview_core::header::{DataElementHeader, SequenceItemHeader, SequenceItemHeaderError, Tag};
use snafu::{Backtrace, ResultExt, Snafu};

pub use self::explicit::ExplicitVrDecoder;
pub use self::implicit::ImplicitVrDecoder;

/// An error from decoding an element or item header.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read the header bytes from the buffer.
    #[snafu(display("Could not read header of element at offset {}", offset))]
    ReadHeader {
        /// offset of the element header
        offset: usize,
        /// the underlying cursor error
        #[snafu(backtrace)]
        source: crate::cursor::Error,
    },
    /// The two VR bytes did not name a known value representation.
    #[snafu(display(
        "Unrecognized VR bytes {:?} for element tagged {} at offset {}",
        std::str::from_utf8(bytes).unwrap_or("??"),
        tag,
        offset
    ))]
    UnknownVr {
        /// the tag of the offending element
        tag: Tag,
        /// the two bytes read in place of a VR
        bytes: [u8; 2],
        /// offset of the element header
        offset: usize,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// The tag is not admissible for a sequence item header.
    #[snafu(display("Invalid sequence item header at offset {}", offset))]
    BadSequenceHeader {
        /// offset of the item header
        offset: usize,
        /// the underlying validation error
        source: SequenceItemHeaderError,
    },
}

/// Result alias for header decoding.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Interface for decoding data element headers from a byte buffer.
///
/// Every operation takes the offset to decode at and returns the decoded
/// entity together with the offset one past the consumed bytes.
pub trait Decode {
    /// Decode a data element header.
    fn decode_header(&self, cursor: &ByteCursor, offset: usize)
        -> Result<(DataElementHeader, usize)>;

    /// Decode a sequence item header
    /// (an item, an item delimiter, or a sequence delimiter).
    fn decode_item_header(
        &self,
        cursor: &ByteCursor,
        offset: usize,
    ) -> Result<(SequenceItemHeader, usize)>;

    /// Decode just an attribute tag.
    fn decode_tag(&self, cursor: &ByteCursor, offset: usize) -> Result<(Tag, usize)>;

    /// The number of header bytes (tag, VR field if any, and value length)
    /// that precede the value of an element with the given header.
    fn header_len(&self, header: &DataElementHeader) -> usize;
}

pub(crate) fn decode_tag_at(cursor: &ByteCursor, offset: usize) -> Result<(Tag, usize)> {
    let group = cursor
        .read_u16(offset)
        .context(ReadHeaderSnafu { offset })?;
    let element = cursor
        .read_u16(offset + 2)
        .context(ReadHeaderSnafu { offset })?;
    Ok((Tag(group, element), offset + 4))
}
