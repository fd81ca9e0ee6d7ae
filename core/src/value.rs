//! This module includes a high level abstraction over a DICOM data element's value.

use crate::header::{HasLength, Length, Tag};
use itertools::Itertools;
use num_traits::NumCast;
use smallvec::SmallVec;
use snafu::Snafu;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The collection type for multi-valued element data.
/// Optimized for the common case of a small number of values.
pub type C<T> = SmallVec<[T; 2]>;

/// An error triggered when a value getter is called
/// on a value of an incompatible variant.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(display("bad value cast: requested {} but value is {:?}", requested, got))]
pub struct CastValueError {
    /// The value variant requested by the caller.
    pub requested: &'static str,
    /// The actual variant of the value.
    pub got: ValueType,
}

/// An error triggered when a value conversion is not possible,
/// either because the variant does not convert to the requested type
/// or because parsing the textual form failed.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(display("could not convert {:?} value to {}", original, requested))]
pub struct ConvertValueError {
    /// The requested output type.
    pub requested: &'static str,
    /// The variant of the value that failed to convert.
    pub original: ValueType,
}

type CastResult<T> = Result<T, CastValueError>;
type ConvertResult<T> = Result<T, ConvertValueError>;

/// An enum representing a primitive value from a DICOM element.
/// The result of decoding an element's data value is one of these variants
/// depending on its value representation, as determined by the decoding
/// dispatch table:
/// OB maps to `I8`, OW to `I16`, OF to `I32`, OD to `I64`, UN to `U8`,
/// the binary integer and float VRs to their matching variants,
/// AT to `Tags`, and every remaining VR to text
/// (`Strs` after backslash splitting, or `Str` for the
/// never-multi-valued text VRs).
#[derive(Debug, PartialEq, Clone)]
pub enum PrimitiveValue {
    /// No data. Used for any value of length 0.
    Empty,

    /// A sequence of strings, after splitting on the `\` value separator.
    Strs(C<String>),

    /// A single string.
    /// Used for ST, LT and UT, which are never multi-valued.
    Str(String),

    /// A sequence of attribute tags, used specifically for AT.
    Tags(C<Tag>),

    /// A sequence of unsigned 8-bit integers. Used for UN.
    U8(C<u8>),

    /// A sequence of signed 8-bit integers. Used for OB.
    I8(C<i8>),

    /// A sequence of unsigned 16-bit integers. Used for US.
    U16(C<u16>),

    /// A sequence of signed 16-bit integers. Used for SS and OW.
    I16(C<i16>),

    /// A sequence of unsigned 32-bit integers. Used for UL.
    U32(C<u32>),

    /// A sequence of signed 32-bit integers. Used for SL and OF.
    I32(C<i32>),

    /// A sequence of signed 64-bit integers. Used for OD.
    I64(C<i64>),

    /// A sequence of 32-bit floating point numbers. Used for FL.
    F32(C<f32>),

    /// A sequence of 64-bit floating point numbers. Used for FD.
    F64(C<f64>),
}

/// Macro for implementing single- and multi-value getters
/// over a `PrimitiveValue` variant.
macro_rules! impl_primitive_getters {
    ($name_single: ident, $name_multi: ident, $variant: ident, $ret: ty) => {
        /// Get a single value of the requested type.
        ///
        /// If it contains multiple values,
        /// only the first one is returned.
        /// An error is returned if the variant is not compatible.
        pub fn $name_single(&self) -> CastResult<$ret> {
            match self {
                PrimitiveValue::$variant(c) if !c.is_empty() => Ok(c[0]),
                value => Err(CastValueError {
                    requested: stringify!($name_single),
                    got: value.value_type(),
                }),
            }
        }

        /// Get a sequence of values of the requested type without copying.
        ///
        /// An error is returned if the variant is not compatible.
        pub fn $name_multi(&self) -> CastResult<&[$ret]> {
            match self {
                PrimitiveValue::$variant(c) => Ok(c),
                value => Err(CastValueError {
                    requested: stringify!($name_multi),
                    got: value.value_type(),
                }),
            }
        }
    };
}

impl PrimitiveValue {
    /// Obtain the number of individual values.
    /// This number may not match the DICOM value multiplicity in some value
    /// representations.
    pub fn multiplicity(&self) -> u32 {
        use self::PrimitiveValue::*;
        match self {
            Empty => 0,
            Str(_) => 1,
            Strs(c) => c.len() as u32,
            Tags(c) => c.len() as u32,
            U8(c) => c.len() as u32,
            I8(c) => c.len() as u32,
            U16(c) => c.len() as u32,
            I16(c) => c.len() as u32,
            U32(c) => c.len() as u32,
            I32(c) => c.len() as u32,
            I64(c) => c.len() as u32,
            F32(c) => c.len() as u32,
            F64(c) => c.len() as u32,
        }
    }

    /// Get a single string value,
    /// with any trailing whitespace or padding characters kept.
    ///
    /// If the value contains multiple strings, only the first is returned.
    /// An error is returned if the variant is not textual.
    pub fn string(&self) -> CastResult<&str> {
        use self::PrimitiveValue::*;
        match self {
            Strs(c) if !c.is_empty() => Ok(&c[0]),
            Str(s) => Ok(s),
            value => Err(CastValueError {
                requested: "string",
                got: value.value_type(),
            }),
        }
    }

    /// Get the inner sequence of string values
    /// if the variant is `Strs`.
    pub fn strings(&self) -> CastResult<&[String]> {
        match self {
            PrimitiveValue::Strs(c) => Ok(c),
            value => Err(CastValueError {
                requested: "strings",
                got: value.value_type(),
            }),
        }
    }

    impl_primitive_getters!(tag, tags, Tags, Tag);
    impl_primitive_getters!(uint8, uint8_slice, U8, u8);
    impl_primitive_getters!(int8, int8_slice, I8, i8);
    impl_primitive_getters!(uint16, uint16_slice, U16, u16);
    impl_primitive_getters!(int16, int16_slice, I16, i16);
    impl_primitive_getters!(uint32, uint32_slice, U32, u32);
    impl_primitive_getters!(int32, int32_slice, I32, i32);
    impl_primitive_getters!(int64, int64_slice, I64, i64);
    impl_primitive_getters!(float32, float32_slice, F32, f32);
    impl_primitive_getters!(float64, float64_slice, F64, f64);

    /// Convert the value to a single clean string,
    /// with trailing whitespace and padding characters removed.
    /// Multiple values are joined with the `\` separator;
    /// numbers are rendered in decimal form.
    pub fn to_str(&self) -> Cow<str> {
        use self::PrimitiveValue::*;
        match self {
            Empty => Cow::from(""),
            Str(s) => Cow::from(s.trim_end_matches(['\0', ' '])),
            Strs(c) if c.len() == 1 => Cow::from(c[0].trim_end_matches(['\0', ' '])),
            Strs(c) => Cow::from(
                c.iter()
                    .map(|s| s.trim_end_matches(['\0', ' ']))
                    .join("\\"),
            ),
            Tags(c) => Cow::from(c.iter().map(|t| t.to_string()).join("\\")),
            U8(c) => Cow::from(c.iter().join("\\")),
            I8(c) => Cow::from(c.iter().join("\\")),
            U16(c) => Cow::from(c.iter().join("\\")),
            I16(c) => Cow::from(c.iter().join("\\")),
            U32(c) => Cow::from(c.iter().join("\\")),
            I32(c) => Cow::from(c.iter().join("\\")),
            I64(c) => Cow::from(c.iter().join("\\")),
            F32(c) => Cow::from(c.iter().join("\\")),
            F64(c) => Cow::from(c.iter().join("\\")),
        }
    }

    /// Convert the full value into a sequence of clean strings.
    pub fn to_multi_str(&self) -> Vec<String> {
        use self::PrimitiveValue::*;
        match self {
            Empty => Vec::new(),
            Str(s) => vec![s.trim_end_matches(['\0', ' ']).to_string()],
            Strs(c) => c
                .iter()
                .map(|s| s.trim_end_matches(['\0', ' ']).to_string())
                .collect(),
            Tags(c) => c.iter().map(|t| t.to_string()).collect(),
            U8(c) => c.iter().map(|v| v.to_string()).collect(),
            I8(c) => c.iter().map(|v| v.to_string()).collect(),
            U16(c) => c.iter().map(|v| v.to_string()).collect(),
            I16(c) => c.iter().map(|v| v.to_string()).collect(),
            U32(c) => c.iter().map(|v| v.to_string()).collect(),
            I32(c) => c.iter().map(|v| v.to_string()).collect(),
            I64(c) => c.iter().map(|v| v.to_string()).collect(),
            F32(c) => c.iter().map(|v| v.to_string()).collect(),
            F64(c) => c.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Retrieve and convert the first value into an integer,
    /// either by numeric cast or by parsing its textual form.
    pub fn to_int<T>(&self) -> ConvertResult<T>
    where
        T: NumCast + FromStr,
    {
        self.nth_to_int(0)
    }

    /// Retrieve and convert all values into integers.
    pub fn to_multi_int<T>(&self) -> ConvertResult<Vec<T>>
    where
        T: NumCast + FromStr,
    {
        (0..self.multiplicity() as usize)
            .map(|i| self.nth_to_int(i))
            .collect()
    }

    fn nth_to_int<T>(&self, i: usize) -> ConvertResult<T>
    where
        T: NumCast + FromStr,
    {
        use self::PrimitiveValue::*;
        let err = || ConvertValueError {
            requested: "integer",
            original: self.value_type(),
        };
        match self {
            U8(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            I8(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            U16(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            I16(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            U32(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            I32(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            I64(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            F32(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            F64(c) => c.get(i).copied().and_then(NumCast::from).ok_or_else(err),
            Str(s) if i == 0 => s.trim().trim_end_matches('\0').trim().parse().map_err(|_| err()),
            Strs(c) => c
                .get(i)
                .ok_or_else(err)?
                .trim()
                .trim_end_matches('\0')
                .trim()
                .parse()
                .map_err(|_| err()),
            _ => Err(err()),
        }
    }

    /// Retrieve and convert the first value into a single-precision float.
    pub fn to_float32(&self) -> ConvertResult<f32> {
        self.to_float64().map(|v| v as f32)
    }

    /// Retrieve and convert the first value into a double-precision float,
    /// either by numeric cast or by parsing its textual form.
    pub fn to_float64(&self) -> ConvertResult<f64> {
        self.nth_to_float64(0)
    }

    /// Retrieve and convert all values into double-precision floats.
    pub fn to_multi_float64(&self) -> ConvertResult<Vec<f64>> {
        (0..self.multiplicity() as usize)
            .map(|i| self.nth_to_float64(i))
            .collect()
    }

    fn nth_to_float64(&self, i: usize) -> ConvertResult<f64> {
        use self::PrimitiveValue::*;
        let err = || ConvertValueError {
            requested: "float64",
            original: self.value_type(),
        };
        match self {
            U8(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            I8(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            U16(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            I16(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            U32(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            I32(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            I64(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            F32(c) => c.get(i).map(|v| *v as f64).ok_or_else(err),
            F64(c) => c.get(i).copied().ok_or_else(err),
            Str(s) if i == 0 => s.trim().trim_end_matches('\0').trim().parse().map_err(|_| err()),
            Strs(c) => c
                .get(i)
                .ok_or_else(err)?
                .trim()
                .trim_end_matches('\0')
                .trim()
                .parse()
                .map_err(|_| err()),
            _ => Err(err()),
        }
    }

    /// Determine the number of bytes that this value would occupy in a
    /// DICOM file, without compression and without the header.
    /// As mandated by the standard, it is always even.
    /// The calculated number does not need to match the size of the
    /// original byte stream.
    pub fn calculate_byte_len(&self) -> usize {
        use self::PrimitiveValue::*;
        let raw = match self {
            Empty => 0,
            U8(c) => c.len(),
            I8(c) => c.len(),
            U16(c) => c.len() * 2,
            I16(c) => c.len() * 2,
            U32(c) => c.len() * 4,
            I32(c) => c.len() * 4,
            I64(c) => c.len() * 8,
            F32(c) => c.len() * 4,
            F64(c) => c.len() * 8,
            Tags(c) => c.len() * 4,
            Str(s) => s.len(),
            Strs(c) if c.is_empty() => 0,
            Strs(c) => c.iter().map(|s| s.len()).sum::<usize>() + c.len() - 1,
        };
        (raw + 1) & !1
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

/// An enum representing an abstraction of a DICOM element's data value type.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValueType {
    /// No data. Used for any value of length 0.
    Empty,
    /// An item. Used for elements in a SQ, regardless of content.
    Item,
    /// An encapsulated pixel data sequence: offset table plus fragments.
    PixelSequence,
    /// A sequence of strings.
    Strs,
    /// A single string.
    Str,
    /// A sequence of attribute tags.
    Tags,
    /// A sequence of unsigned 8-bit integers.
    U8,
    /// A sequence of signed 8-bit integers.
    I8,
    /// A sequence of unsigned 16-bit integers.
    U16,
    /// A sequence of signed 16-bit integers.
    I16,
    /// A sequence of unsigned 32-bit integers.
    U32,
    /// A sequence of signed 32-bit integers.
    I32,
    /// A sequence of signed 64-bit integers.
    I64,
    /// A sequence of 32-bit floating point numbers.
    F32,
    /// A sequence of 64-bit floating point numbers.
    F64,
}

/// A trait for a value that maps to a DICOM element data value.
pub trait DicomValueType: HasLength {
    /// Retrieve the specific type of this value.
    fn value_type(&self) -> ValueType;

    /// Retrieve the number of elements contained in the DICOM value.
    ///
    /// In a sequence value, this is the number of items in the sequence.
    /// In an encapsulated pixel data sequence, the output is always 1.
    /// In all other cases, the output is the number of elements
    /// effectively present in the value.
    fn cardinality(&self) -> usize;
}

impl HasLength for PrimitiveValue {
    fn length(&self) -> Length {
        Length::defined(self.calculate_byte_len() as u32)
    }
}

impl DicomValueType for PrimitiveValue {
    fn value_type(&self) -> ValueType {
        use self::PrimitiveValue::*;
        match self {
            Empty => ValueType::Empty,
            Str(_) => ValueType::Str,
            Strs(_) => ValueType::Strs,
            Tags(_) => ValueType::Tags,
            U8(_) => ValueType::U8,
            I8(_) => ValueType::I8,
            U16(_) => ValueType::U16,
            I16(_) => ValueType::I16,
            U32(_) => ValueType::U32,
            I32(_) => ValueType::I32,
            I64(_) => ValueType::I64,
            F32(_) => ValueType::F32,
            F64(_) => ValueType::F64,
        }
    }

    fn cardinality(&self) -> usize {
        self.multiplicity() as usize
    }
}

/// Representation of a full DICOM value, which may be
/// a primitive value, a nested data set (sequence of items),
/// or an encapsulated pixel data sequence.
#[derive(Debug, Clone)]
pub enum Value<I, P = Vec<u8>> {
    /// Primitive value.
    Primitive(PrimitiveValue),
    /// A complex sequence of items.
    Sequence {
        /// Item collection.
        items: C<I>,
        /// The size in bytes (may be undefined).
        size: Length,
    },
    /// An encapsulated pixel data sequence.
    PixelSequence {
        /// The value contents of the Basic Offset Table.
        offset_table: C<u32>,
        /// The pixel data fragments, one byte buffer each.
        fragments: C<P>,
    },
}

/// Value equality is structural: sequence values compare by their items,
/// with the declared size (which may be undefined) disregarded.
impl<I: PartialEq, P: PartialEq> PartialEq for Value<I, P> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Primitive(a), Value::Primitive(b)) => a == b,
            (Value::Sequence { items: a, .. }, Value::Sequence { items: b, .. }) => a == b,
            (
                Value::PixelSequence {
                    offset_table: ta,
                    fragments: fa,
                },
                Value::PixelSequence {
                    offset_table: tb,
                    fragments: fb,
                },
            ) => ta == tb && fa == fb,
            _ => false,
        }
    }
}

impl<I, P> Value<I, P> {
    /// Gets a reference to the primitive value.
    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Gets a reference to the sequence items.
    pub fn items(&self) -> Option<&[I]> {
        match self {
            Value::Sequence { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Gets a reference to the pixel data fragments.
    pub fn fragments(&self) -> Option<&[P]> {
        match self {
            Value::PixelSequence { fragments, .. } => Some(fragments),
            _ => None,
        }
    }

    /// Gets a mutable reference to the pixel data fragments.
    pub fn fragments_mut(&mut self) -> Option<&mut C<P>> {
        match self {
            Value::PixelSequence { fragments, .. } => Some(fragments),
            _ => None,
        }
    }

    /// Gets a reference to the Basic Offset Table contents.
    pub fn offset_table(&self) -> Option<&[u32]> {
        match self {
            Value::PixelSequence { offset_table, .. } => Some(offset_table),
            _ => None,
        }
    }

    /// Retrieves the primitive value.
    pub fn into_primitive(self) -> Option<PrimitiveValue> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Retrieves the sequence items.
    pub fn into_items(self) -> Option<C<I>> {
        match self {
            Value::Sequence { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Get a single string value as in [`PrimitiveValue::string`].
    pub fn string(&self) -> CastResult<&str> {
        match self {
            Value::Primitive(v) => v.string(),
            Value::Sequence { .. } => Err(CastValueError {
                requested: "string",
                got: ValueType::Item,
            }),
            Value::PixelSequence { .. } => Err(CastValueError {
                requested: "string",
                got: ValueType::PixelSequence,
            }),
        }
    }

    /// Convert the value to a single clean string
    /// as in [`PrimitiveValue::to_str`].
    pub fn to_str(&self) -> CastResult<Cow<str>> {
        match self {
            Value::Primitive(v) => Ok(v.to_str()),
            Value::Sequence { .. } => Err(CastValueError {
                requested: "string",
                got: ValueType::Item,
            }),
            Value::PixelSequence { .. } => Err(CastValueError {
                requested: "string",
                got: ValueType::PixelSequence,
            }),
        }
    }
}

impl<I, P> HasLength for Value<I, P> {
    fn length(&self) -> Length {
        match self {
            Value::Primitive(v) => v.length(),
            Value::Sequence { size, .. } => *size,
            Value::PixelSequence { .. } => Length::UNDEFINED,
        }
    }
}

impl<I, P> DicomValueType for Value<I, P>
where
    I: DicomValueType,
{
    fn value_type(&self) -> ValueType {
        match self {
            Value::Primitive(v) => v.value_type(),
            Value::Sequence { .. } => ValueType::Item,
            Value::PixelSequence { .. } => ValueType::PixelSequence,
        }
    }

    fn cardinality(&self) -> usize {
        match self {
            Value::Primitive(v) => v.cardinality(),
            Value::Sequence { items, .. } => items.len(),
            Value::PixelSequence { .. } => 1,
        }
    }
}

impl<I, P> From<PrimitiveValue> for Value<I, P> {
    fn from(v: PrimitiveValue) -> Self {
        Value::Primitive(v)
    }
}

impl<I, P> From<&str> for Value<I, P> {
    fn from(v: &str) -> Self {
        Value::Primitive(PrimitiveValue::Str(v.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_value_to_str() {
        let v = PrimitiveValue::Strs(smallvec::smallvec![
            "MONOCHROME2 ".to_string(),
        ]);
        assert_eq!(v.to_str(), "MONOCHROME2");

        let v = PrimitiveValue::Strs(smallvec::smallvec![
            "1.5".to_string(),
            "2.5".to_string(),
        ]);
        assert_eq!(v.to_str(), "1.5\\2.5");

        let v = PrimitiveValue::U16(smallvec::smallvec![8, 16]);
        assert_eq!(v.to_str(), "8\\16");
    }

    #[test]
    fn primitive_value_conversions() {
        let v = PrimitiveValue::Strs(smallvec::smallvec!["256 ".to_string()]);
        assert_eq!(v.to_int::<u16>().unwrap(), 256);

        let v = PrimitiveValue::U16(smallvec::smallvec![42]);
        assert_eq!(v.to_int::<i32>().unwrap(), 42);
        assert_eq!(v.to_float64().unwrap(), 42.0);

        let v = PrimitiveValue::Strs(smallvec::smallvec![
            "0.5".to_string(),
            "0.75".to_string(),
        ]);
        assert_eq!(v.to_multi_float64().unwrap(), vec![0.5, 0.75]);

        let v = PrimitiveValue::Empty;
        assert!(v.to_int::<u16>().is_err());
    }

    #[test]
    fn primitive_value_byte_len() {
        assert_eq!(PrimitiveValue::Empty.calculate_byte_len(), 0);
        assert_eq!(
            PrimitiveValue::U16(smallvec::smallvec![1, 2, 3]).calculate_byte_len(),
            6
        );
        // odd raw lengths round up to even
        assert_eq!(
            PrimitiveValue::Str("1.2.840.10008.1.2".to_string()).calculate_byte_len(),
            18
        );
        assert_eq!(
            PrimitiveValue::Strs(smallvec::smallvec![
                "A".to_string(),
                "BB".to_string()
            ])
            .calculate_byte_len(),
            4
        );
    }
}
