//! Explicit VR header decoding.
//!
//! The same decoder serves Explicit VR Little Endian and
//! Explicit VR Big Endian data sets: the byte order of the tag and length
//! fields comes from the cursor, while the VR field is plain ASCII.

use crate::cursor::ByteCursor;
use crate::decode::{
    decode_tag_at, BadSequenceHeaderSnafu, Decode, ReadHeaderSnafu, Result, UnknownVrSnafu,
};
use dicoview_core::header::{DataElementHeader, Length, SequenceItemHeader, Tag, VR};
use snafu::ResultExt;

/// A data element header decoder for the explicit VR transfer syntaxes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitVrDecoder;

impl Decode for ExplicitVrDecoder {
    fn decode_header(
        &self,
        cursor: &ByteCursor,
        offset: usize,
    ) -> Result<(DataElementHeader, usize)> {
        let (tag, pos) = decode_tag_at(cursor, offset)?;

        if tag.group() == 0xFFFE {
            // item delimiters do not have a VR or reserved field
            let len = cursor.read_u32(pos).context(ReadHeaderSnafu { offset })?;
            return Ok((
                DataElementHeader::new(tag, VR::UN, Length(len)),
                pos + 4,
            ));
        }

        let vr_bytes = cursor
            .read_exact(pos, 2)
            .context(ReadHeaderSnafu { offset })?;
        let vr_bytes = [vr_bytes[0], vr_bytes[1]];
        let vr = VR::from_binary(vr_bytes).ok_or_else(|| {
            UnknownVrSnafu {
                tag,
                bytes: vr_bytes,
                offset,
            }
            .build()
        })?;

        // the long form carries a 2-byte reserved gap and a 32-bit length,
        // which must be skipped even when the reserved bytes are zero
        let (len, end) = if vr.has_reserved_vl() {
            let len = cursor
                .read_u32(pos + 4)
                .context(ReadHeaderSnafu { offset })?;
            (len, pos + 8)
        } else {
            let len = cursor
                .read_u16(pos + 2)
                .context(ReadHeaderSnafu { offset })?;
            (u32::from(len), pos + 4)
        };

        Ok((DataElementHeader::new(tag, vr, Length(len)), end))
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

    fn header_len(&self, header: &DataElementHeader) -> usize {
        if header.tag.group() == 0xFFFE {
            8
        } else if header.vr.has_reserved_vl() {
            12
        } else {
            8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExplicitVrDecoder;
    use crate::cursor::ByteCursor;
    use crate::decode::Decode;
    use byteordered::Endianness;
    use dicoview_core::header::{HasLength, Header, Length, Tag, VR};

    // manually crafting some DICOM data elements
    //  Tag: (0002,0002) Media Storage SOP Class UID
    //  VR: UI
    //  Length: 26
    //  Value: "1.2.840.10008.5.1.4.1.1.1\0"
    // --
    //  Tag: (0002,0010) Transfer Syntax UID
    //  VR: UI
    //  Length: 20
    //  Value: "1.2.840.10008.1.2.1\0" == ExplicitVRLittleEndian
    // --
    const RAW: &[u8; 62] = &[
        0x02, 0x00, 0x02, 0x00, 0x55, 0x49, 0x1a, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x38, 0x34, 0x30,
        0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x35, 0x2e, 0x31, 0x2e, 0x34, 0x2e, 0x31, 0x2e,
        0x31, 0x2e, 0x31, 0x00, 0x02, 0x00, 0x10, 0x00, 0x55, 0x49, 0x14, 0x00, 0x31, 0x2e, 0x32,
        0x2e, 0x38, 0x34, 0x30, 0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x31, 0x2e, 0x32, 0x2e,
        0x31, 0x00,
    ];

    #[test]
    fn decode_data_elements() {
        let dec = ExplicitVrDecoder;
        let cursor = ByteCursor::new(RAW, Endianness::Little);

        let (elem, pos) = dec
            .decode_header(&cursor, 0)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(2, 2));
        assert_eq!(elem.vr(), VR::UI);
        assert_eq!(elem.length(), Length(26));
        assert_eq!(pos, 8);

        let value_end = pos + elem.length().get().unwrap() as usize;
        assert_eq!(
            cursor.read_exact(pos, 26).unwrap(),
            b"1.2.840.10008.5.1.4.1.1.1\0".as_ref()
        );

        let (elem, pos) = dec
            .decode_header(&cursor, value_end)
            .expect("should find an element");
        assert_eq!(elem.tag(), Tag(2, 16));
        assert_eq!(elem.vr(), VR::UI);
        assert_eq!(elem.length(), Length(20));
        assert_eq!(
            cursor.read_exact(pos, 20).unwrap(),
            b"1.2.840.10008.1.2.1\0".as_ref()
        );
    }

    // manually crafting some DICOM sequence/item delimiters
    //  Tag: (0008,103F) Series Description Code Sequence
    //  VR: SQ
    //  Reserved bytes: 0x0000
    //  Length: 0xFFFF_FFFF
    // --
    //  Tag: (FFFE,E000) Item
    //  Length: 0xFFFF_FFFF (unspecified)
    // --
    //  Tag: (FFFE,E00D) Item Delimitation Item
    //  Length: 0
    // --
    //  Tag: (FFFE,E0DD) Sequence Delimitation Item
    //  Length: 0
    // --
    const RAW_SEQUENCE_ITEMS: &[u8] = &[
        0x08, 0x00, 0x3F, 0x10, b'S', b'Q', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0x00,
        0xE0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00, 0xFE, 0xFF,
        0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn decode_items() {
        let dec = ExplicitVrDecoder;
        let cursor = ByteCursor::new(RAW_SEQUENCE_ITEMS, Endianness::Little);

        let (elem, pos) = dec
            .decode_header(&cursor, 0)
            .expect("should find an element header");
        assert_eq!(elem.tag(), Tag(8, 0x103F));
        assert_eq!(elem.vr(), VR::SQ);
        assert!(elem.length().is_undefined());
        assert_eq!(pos, 12);

        let (elem, pos) = dec
            .decode_item_header(&cursor, pos)
            .expect("should find an item header");
        assert!(elem.is_item());
        assert!(elem.length().is_undefined());
        assert_eq!(pos, 20);

        let (elem, pos) = dec
            .decode_item_header(&cursor, pos)
            .expect("should find an item header");
        assert!(elem.is_item_delimiter());
        assert_eq!(pos, 28);

        let (elem, pos) = dec
            .decode_item_header(&cursor, pos)
            .expect("should find an item header");
        assert!(elem.is_sequence_delimiter());
        assert_eq!(pos, 36);
    }

    #[test]
    fn decode_big_endian_header() {
        // (0028,0010) Rows, US, len 2 in big endian
        const RAW_BE: &[u8] = &[0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02, 0x00, 0x02];
        let dec = ExplicitVrDecoder;
        let cursor = ByteCursor::new(RAW_BE, Endianness::Big);
        let (elem, pos) = dec.decode_header(&cursor, 0).unwrap();
        assert_eq!(elem.tag(), Tag(0x0028, 0x0010));
        assert_eq!(elem.vr(), VR::US);
        assert_eq!(elem.length(), Length(2));
        assert_eq!(cursor.read_u16(pos).unwrap(), 2);
    }

    #[test]
    fn reject_unknown_vr() {
        const RAW_BAD: &[u8] = &[0x08, 0x00, 0x05, 0x00, b'?', b'?', 0x04, 0x00];
        let dec = ExplicitVrDecoder;
        let cursor = ByteCursor::new(RAW_BAD, Endianness::Little);
        assert!(dec.decode_header(&cursor, 0).is_err());
    }
}
