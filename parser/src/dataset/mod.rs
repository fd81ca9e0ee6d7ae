//! Interpretation of DICOM data sets as streams of tokens.
//!
//! A data set is traversed as a sequence of [`DataToken`]s, which may
//! represent element headers, primitive values, or the boundaries of
//! sequences, items and encapsulated pixel data. Reading and writing are
//! each other's inverse over this token stream.

use dicoview_core::header::{DataElementHeader, Length};
use dicoview_core::value::{C, DicomValueType, PrimitiveValue};
use dicoview_core::Tag;
use std::fmt;

pub mod read;
pub mod write;

pub use self::read::DataSetReader;
pub use self::write::DataSetWriter;

/// A token of a DICOM data set stream. This is part of the interpretation
/// of a data set as a stream of symbols, which may either represent data
/// headers or actual value data.
#[derive(Debug, Clone)]
pub enum DataToken {
    /// A data header of a primitive value.
    ElementHeader(DataElementHeader),
    /// The beginning of a sequence element.
    SequenceStart {
        /// the sequence tag
        tag: Tag,
        /// the specified length of the sequence value
        /// (undefined when delimiter terminated)
        len: Length,
    },
    /// The beginning of an encapsulated pixel data element.
    /// The header's length is always undefined.
    PixelSequenceStart {
        /// the pixel data element header
        header: DataElementHeader,
    },
    /// The ending delimiter of a sequence.
    SequenceEnd,
    /// The beginning of a new item in the sequence.
    ItemStart {
        /// the specified length of the item
        /// (undefined when delimiter terminated)
        len: Length,
    },
    /// The ending delimiter of an item.
    ItemEnd,
    /// A primitive data element value.
    PrimitiveValue(PrimitiveValue),
    /// The Basic Offset Table of an encapsulated pixel data element.
    OffsetTable(C<u32>),
    /// A pixel data fragment.
    ItemValue(Vec<u8>),
}

/// Token equality compares lengths by their raw 32-bit form,
/// so that two undefined lengths are treated as the same symbol.
impl PartialEq for DataToken {
    fn eq(&self, other: &Self) -> bool {
        fn eq_header(a: &DataElementHeader, b: &DataElementHeader) -> bool {
            a.tag == b.tag && a.vr == b.vr && a.len.0 == b.len.0
        }
        match (self, other) {
            (DataToken::ElementHeader(a), DataToken::ElementHeader(b)) => eq_header(a, b),
            (
                DataToken::SequenceStart { tag: ta, len: la },
                DataToken::SequenceStart { tag: tb, len: lb },
            ) => ta == tb && la.0 == lb.0,
            (
                DataToken::PixelSequenceStart { header: a },
                DataToken::PixelSequenceStart { header: b },
            ) => eq_header(a, b),
            (DataToken::SequenceEnd, DataToken::SequenceEnd) => true,
            (DataToken::ItemStart { len: la }, DataToken::ItemStart { len: lb }) => la.0 == lb.0,
            (DataToken::ItemEnd, DataToken::ItemEnd) => true,
            (DataToken::PrimitiveValue(a), DataToken::PrimitiveValue(b)) => a == b,
            (DataToken::OffsetTable(a), DataToken::OffsetTable(b)) => a == b,
            (DataToken::ItemValue(a), DataToken::ItemValue(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for DataToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataToken::PrimitiveValue(ref v) => write!(f, "PrimitiveValue({:?})", v.value_type()),
            other => write!(f, "{:?}", other),
        }
    }
}

/// The type of delimiter: sequence or item.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum SeqTokenType {
    Sequence,
    Item,
}
