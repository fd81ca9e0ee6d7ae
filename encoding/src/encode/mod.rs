//! This module contains the element header encoders,
//! the inverse of [`decode`](crate::decode):
//! one per wire form, writing through a
//! [`ByteWriter`](crate::cursor::ByteWriter) whose byte order matches the
//! transfer syntax in effect.

pub mod explicit;
pub mod implicit;

use crate::cursor::ByteWriter;
use dicoview_core::header::DataElementHeader;

pub use self::explicit::ExplicitVrEncoder;
pub use self::implicit::ImplicitVrEncoder;

/// Interface for encoding data element headers into a byte buffer.
pub trait Encode {
    /// Encode a data element header, returning the number of bytes written.
    fn encode_element_header(&self, to: &mut ByteWriter, header: &DataElementHeader) -> usize;

    /// Encode an item header with the given length
    /// (which may be `0xFFFF_FFFF` for undefined length items).
    fn encode_item_header(&self, to: &mut ByteWriter, len: u32);

    /// Encode an item delimitation item, with zero length.
    fn encode_item_delimiter(&self, to: &mut ByteWriter);

    /// Encode a sequence delimitation item, with zero length.
    fn encode_sequence_delimiter(&self, to: &mut ByteWriter);

    /// The number of header bytes (tag, VR field if any, and value length)
    /// that will precede the value of an element with the given header.
    fn header_len(&self, header: &DataElementHeader) -> usize;
}

pub(crate) fn encode_tag(to: &mut ByteWriter, tag: dicoview_core::Tag) {
    to.write_u16(tag.group());
    to.write_u16(tag.element());
}

/// The header sizes of the three wire forms:
/// 8 bytes for implicit VR and tags without a VR field,
/// 12 bytes for explicit VR with a reserved gap and 32-bit length,
/// 8 bytes for explicit VR with a 16-bit length.
#[cfg(test)]
mod tests {
    use super::*;
    use byteordered::Endianness;
    use dicoview_core::header::{Length, Tag, VR};

    #[test]
    fn header_sizes() {
        let explicit = ExplicitVrEncoder;
        let implicit = ImplicitVrEncoder;

        let short = DataElementHeader::new(Tag(0x0028, 0x0010), VR::US, Length(2));
        let long = DataElementHeader::new(Tag(0x7FE0, 0x0010), VR::OW, Length(8));
        let seq = DataElementHeader::new(Tag(0x0008, 0x1115), VR::SQ, Length::UNDEFINED);
        let delim = DataElementHeader::new(Tag(0xFFFE, 0xE000), VR::UN, Length(0));

        assert_eq!(explicit.header_len(&short), 8);
        assert_eq!(explicit.header_len(&long), 12);
        assert_eq!(explicit.header_len(&seq), 12);
        assert_eq!(explicit.header_len(&delim), 8);

        assert_eq!(implicit.header_len(&short), 8);
        assert_eq!(implicit.header_len(&long), 8);
        assert_eq!(implicit.header_len(&seq), 8);
    }

    #[test]
    fn encoded_bytes_match_decoders() {
        let mut w = ByteWriter::new(Endianness::Little);
        let header = DataElementHeader::new(Tag(0x0028, 0x0011), VR::US, Length(2));
        let written = ExplicitVrEncoder.encode_element_header(&mut w, &header);
        assert_eq!(written, 8);
        assert_eq!(
            w.as_bytes(),
            &[0x28, 0x00, 0x11, 0x00, b'U', b'S', 0x02, 0x00]
        );

        let mut w = ByteWriter::new(Endianness::Little);
        let header = DataElementHeader::new(Tag(0x7FE0, 0x0010), VR::OW, Length::UNDEFINED);
        let written = ExplicitVrEncoder.encode_element_header(&mut w, &header);
        assert_eq!(written, 12);
        assert_eq!(
            w.as_bytes(),
            &[0xE0, 0x7F, 0x10, 0x00, b'O', b'W', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]
        );

        let mut w = ByteWriter::new(Endianness::Little);
        let header = DataElementHeader::new(Tag(0x0010, 0x0010), VR::PN, Length(8));
        let written = ImplicitVrEncoder.encode_element_header(&mut w, &header);
        assert_eq!(written, 8);
        assert_eq!(
            w.as_bytes(),
            &[0x10, 0x00, 0x10, 0x00, 0x08, 0x00, 0x00, 0x00]
        );

        let mut w = ByteWriter::new(Endianness::Little);
        ExplicitVrEncoder.encode_sequence_delimiter(&mut w);
        assert_eq!(
            w.as_bytes(),
            &[0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00]
        );
    }
}
