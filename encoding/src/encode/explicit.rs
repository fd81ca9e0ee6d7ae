//! Explicit VR header encoding,
//! serving both the little endian and big endian forms
//! through the writer's configured byte order.

use crate::cursor::ByteWriter;
use crate::encode::{encode_tag, Encode};
use dicoview_core::header::DataElementHeader;
use dicoview_core::Tag;

/// A data element header encoder for the explicit VR transfer syntaxes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitVrEncoder;

impl Encode for ExplicitVrEncoder {
    fn encode_element_header(&self, to: &mut ByteWriter, header: &DataElementHeader) -> usize {
        if header.tag.group() == 0xFFFE {
            // delimiters carry no VR field
            encode_tag(to, header.tag);
            to.write_u32(header.len.0);
            return 8;
        }

        encode_tag(to, header.tag);
        to.write_bytes(&header.vr.to_bytes());
        if header.vr.has_reserved_vl() {
            to.write_u16(0);
            to.write_u32(header.len.0);
            12
        } else {
            to.write_u16(header.len.0 as u16);
            8
        }
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
