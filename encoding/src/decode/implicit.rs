//! Implicit VR header decoding.
//!
//! No VR travels on the wire: the value representation of each element is
//! looked up in the data dictionary, falling back to `UN` for unknown tags.
//! The value length is always a 32-bit field.

use crate::cursor::ByteCursor;
use crate::decode::{
    decode_tag_at, BadSequenceHeaderSnafu, Decode, ReadHeaderSnafu, Result,
};
use dicoview_core::dictionary::{DataDictionary, StandardDataDictionary};
use dicoview_core::header::{DataElementHeader, Length, SequenceItemHeader, Tag, VR};
use snafu::ResultExt;

/// A data element header decoder for the Implicit VR Little Endian
/// transfer syntax, which determines the VR of each element
/// from a data dictionary.
#[derive(Debug, Default, Clone)]
pub struct ImplicitVrDecoder<D = StandardDataDictionary> {
    dict: D,
}

impl<D> ImplicitVrDecoder<D> {
    /// Create a decoder resolving VRs with the given dictionary.
    pub fn with_dict(dict: D) -> Self {
        ImplicitVrDecoder { dict }
    }
}

impl<D> Decode for ImplicitVrDecoder<D>
where
    D: DataDictionary,
{
    fn decode_header(
        &self,
        cursor: &ByteCursor,
        offset: usize,
    ) -> Result<(DataElementHeader, usize)> {
        let (tag, pos) = decode_tag_at(cursor, offset)?;
        let len = cursor.read_u32(pos).context(ReadHeaderSnafu { offset })?;

        let vr = if tag.group() == 0xFFFE {
            VR::UN
        } else {
            self.dict.vr_of(tag)
        };

        Ok((DataElementHeader::new(tag, vr, Length(len)), pos + 4))
    }

    fn decode_item_header(
        &self,
        cursor: &ByteCursor,
        offset: usize,
    ) -> Result<(SequenceItemHeader, usize)> {
        let (tag, pos) = decode_tag_at(cursor, offset)?;
        let len = cursor.read_u32(pos).context(ReadHeaderSnafu { offset })?;
        let header = SequenceItemHeader::new(tag, Length(len))
            .context(BadSequenceHeaderSnafu { offset })?;
        Ok((header, pos + 4))
    }

    fn decode_tag(&self, cursor: &ByteCursor, offset: usize) -> Result<(Tag, usize)> {
        decode_tag_at(cursor, offset)
    }

    fn header_len(&self, _header: &DataElementHeader) -> usize {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::ImplicitVrDecoder;
    use crate::cursor::ByteCursor;
    use crate::decode::Decode;
    use byteordered::Endianness;
    use dicoview_core::dictionary::StandardDataDictionary;
    use dicoview_core::header::{HasLength, Header, Length, Tag, VR};

    // manually crafting some DICOM data elements
    //  Tag: (0008,0005) Specific Character Set
    //  Length: 10
    //  Value: "ISO_IR 100"
    // --
    //  Tag: (0010,0010) Patient's Name
    //  Length: 8
    //  Value: "Doe^John"
    // --
    //  Tag: (0099,1234) «private, unknown attribute»
    //  Length: 4
    //  Value: 0x9999_9999
    const RAW: &[u8] = &[
        0x08, 0x00, 0x05, 0x00, 0x0a, 0x00, 0x00, 0x00, 0x49, 0x53, 0x4f, 0x5f, 0x49, 0x52, 0x20,
        0x31, 0x30, 0x30, 0x10, 0x00, 0x10, 0x00, 0x08, 0x00, 0x00, 0x00, 0x44, 0x6f, 0x65, 0x5e,
        0x4a, 0x6f, 0x68, 0x6e, 0x99, 0x00, 0x34, 0x12, 0x04, 0x00, 0x00, 0x00, 0x99, 0x99, 0x99,
        0x99,
    ];

    #[test]
    fn decode_implicit_vr_headers() {
        let dec = ImplicitVrDecoder::<StandardDataDictionary>::default();
        let cursor = ByteCursor::new(RAW, Endianness::Little);

        let (elem, pos) = dec
            .decode_header(&cursor, 0)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(0x0008, 0x0005));
        assert_eq!(elem.vr(), VR::CS);
        assert_eq!(elem.length(), Length(10));
        assert_eq!(pos, 8);

        let (elem, pos) = dec
            .decode_header(&cursor, 18)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(0x0010, 0x0010));
        assert_eq!(elem.vr(), VR::PN);
        assert_eq!(elem.length(), Length(8));
        assert_eq!(pos, 26);

        // unknown attributes decode as UN
        let (elem, _pos) = dec
            .decode_header(&cursor, 34)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(0x0099, 0x1234));
        assert_eq!(elem.vr(), VR::UN);
        assert_eq!(elem.length(), Length(4));
    }
}
