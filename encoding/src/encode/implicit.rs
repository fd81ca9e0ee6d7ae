//! Implicit VR header encoding: a tag and a 32-bit length, nothing else.

use crate::cursor::ByteWriter;
use crate::encode::{encode_tag, Encode};
use dicoview_core::header::DataElementHeader;
use dicoview_core::Tag;

/// A data element header encoder for the Implicit VR Little Endian
/// transfer syntax.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitVrEncoder;

impl Encode for ImplicitVrEncoder {
    fn encode_element_header(&self, to: &mut ByteWriter, header: &DataElementHeader) -> usize {
        encode_tag(to, header.tag);
        to.write_u32(header.len.0);
        8
    }

    fn encode_item_header(&self, to: &mut ByteWriter, len: u32) {
        encode_tag(to, Tag(0xFFFE, 0xE000));
        to.write_u32(len);
    }

    fn encode_item_delimiter(&self, to: &mut ByteWriter) {
        encode_tag(to, Tag(0xFFFE, 0xE00D));
        to.write_u32(0);
    }

    fn encode_sequence_delimiter(&self, to: &mut ByteWriter) {
        encode_tag(to, Tag(0xFFFE, 0xE0DD));
        to.write_u32(0);
    }

    fn header_len(&self, _header: &DataElementHeader) -> usize {
        8
    }
}
