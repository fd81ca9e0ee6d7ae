//! Reading and writing of the DICOM File Meta group.
//!
//! The File Meta group is always encoded in Explicit VR Little Endian,
//! regardless of the transfer syntax that the rest of the data set is
//! encoded with. On write, the group length is recomputed exactly and the
//! implementation identification elements are owned by this engine.

use crate::mem::{BuildError, DataSet, InMemElement};
use dicoview_core::header::Length;
use dicoview_core::value::PrimitiveValue;
use dicoview_core::{tags, Tag, VR};
use dicoview_encoding::cursor::ByteCursor;
use dicoview_encoding::decode::{Decode, ExplicitVrDecoder};
use dicoview_encoding::text::SpecificCharacterSet;
use dicoview_encoding::transfer_syntax::EXPLICIT_VR_LITTLE_ENDIAN;
use dicoview_encoding::Endianness;
use dicoview_parser::dataset::read::DataSetReader;
use dicoview_parser::dataset::write::{self, DataSetWriter};
use snafu::{Backtrace, ResultExt, Snafu};

/// The DICOM magic code, found at offset 128 of a DICOM file.
pub const DICM_MAGIC_CODE: [u8; 4] = [b'D', b'I', b'C', b'M'];

/// The byte offset at which the magic code lives.
pub const MAGIC_OFFSET: usize = 128;

/// The byte offset at which the File Meta group begins.
pub const META_OFFSET: usize = 132;

/// The Implementation Class UID written into every produced file.
pub const IMPLEMENTATION_CLASS_UID: &str = "1.2.826.0.1.3680043.10.1511.1.1";

/// The Implementation Version Name written into every produced file.
/// Kept at an even byte length so that no padding is required.
pub const IMPLEMENTATION_VERSION_NAME: &str = "DICOVIEW_0.1.0";

/// An error while interpreting the File Meta group.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The group length element could not be decoded.
    #[snafu(display("Could not read File Meta group length"))]
    ReadGroupLength {
        /// the underlying decoding error
        #[snafu(backtrace)]
        source: dicoview_encoding::decode::Error,
    },
    /// The group length value could not be read.
    #[snafu(display("Could not read File Meta group length value"))]
    ReadGroupLengthValue {
        /// the underlying cursor error
        #[snafu(backtrace)]
        source: dicoview_encoding::cursor::Error,
    },
    /// The File Meta group did not start with (0002,0000).
    #[snafu(display("Unexpected tag {} at the start of the File Meta group", tag))]
    UnexpectedTag {
        /// the tag effectively found
        tag: Tag,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// The remaining File Meta elements could not be parsed.
    #[snafu(display("Could not read File Meta group"))]
    BuildMeta {
        /// the underlying build error
        #[snafu(backtrace)]
        source: BuildError,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// Read the File Meta group from the given file buffer,
/// returning its elements (including the group length element)
/// and the offset at which the data set proper begins.
///
/// The group is read in Explicit VR Little Endian,
/// bounded by the value of (0002,0000) File Meta Information Group Length.
pub(crate) fn read_meta_group(data: &[u8]) -> Result<(DataSet, usize)> {
    let cursor = ByteCursor::new(data, Endianness::Little);
    let decoder = ExplicitVrDecoder;

    let (header, pos) = decoder
        .decode_header(&cursor, META_OFFSET)
        .context(ReadGroupLengthSnafu)?;
    if header.tag != tags::FILE_META_INFORMATION_GROUP_LENGTH {
        return UnexpectedTagSnafu { tag: header.tag }.fail();
    }
    let group_length = cursor.read_u32(pos).context(ReadGroupLengthValueSnafu)?;
    let meta_start = pos + 4;
    let meta_end = meta_start + group_length as usize;

    let mut reader = DataSetReader::new(
        data,
        &EXPLICIT_VR_LITTLE_ENDIAN,
        SpecificCharacterSet::default(),
        meta_start,
        meta_end,
    );
    let mut meta = DataSet::build_object(&mut reader).context(BuildMetaSnafu)?;
    meta.put(InMemElement::new(
        tags::FILE_META_INFORMATION_GROUP_LENGTH,
        VR::UL,
        PrimitiveValue::U32([group_length].as_ref().into()),
    ));

    Ok((meta, meta_end))
}

/// Serialize the given File Meta elements in Explicit VR Little Endian,
/// with the three writer-owned elements synthesized:
/// (0002,0000) is recomputed to the exact byte count of the group,
/// and (0002,0012)/(0002,0013) carry this engine's implementation
/// identification.
pub(crate) fn write_meta_group(meta: &DataSet) -> Result<Vec<u8>, write::Error> {
    let mut group = meta.clone();
    group.remove(tags::FILE_META_INFORMATION_GROUP_LENGTH);
    group.put(InMemElement::new(
        tags::IMPLEMENTATION_CLASS_UID,
        VR::UI,
        PrimitiveValue::Strs([IMPLEMENTATION_CLASS_UID.to_owned()].as_ref().into()),
    ));
    group.put(InMemElement::new(
        tags::IMPLEMENTATION_VERSION_NAME,
        VR::SH,
        PrimitiveValue::Strs([IMPLEMENTATION_VERSION_NAME.to_owned()].as_ref().into()),
    ));

    let mut body_writer =
        DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, SpecificCharacterSet::default());
    group.write_to(&mut body_writer)?;
    let body = body_writer.into_inner();

    let mut out_writer =
        DataSetWriter::new(&EXPLICIT_VR_LITTLE_ENDIAN, SpecificCharacterSet::default());
    out_writer.write_token(dicoview_parser::dataset::DataToken::ElementHeader(
        dicoview_core::header::DataElementHeader::new(
            tags::FILE_META_INFORMATION_GROUP_LENGTH,
            VR::UL,
            Length(4),
        ),
    ))?;
    out_writer.write_token(dicoview_parser::dataset::DataToken::PrimitiveValue(
        PrimitiveValue::U32([body.len() as u32].as_ref().into()),
    ))?;
    let mut out = out_writer.into_inner();
    out.extend_from_slice(&body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicoview_core::HasLength;

    #[rustfmt::skip]
    const TEST_META_1: &[u8] = &[
        // 128-byte preamble handled by the caller; this buffer is padded
        // with zeros up to the magic code offset by the test helper
        // magic code
        b'D', b'I', b'C', b'M',
        // File Meta Information Group Length: (0002,0000) ; UL ; 4 ; 92
        0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 0x5c, 0x00, 0x00, 0x00,
        // File Meta Information Version: (0002,0001) ; OB ; 2 ; [0x00, 0x01]
        0x02, 0x00, 0x01, 0x00, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01,
        // Transfer Syntax UID (0002,0010) ; UI ; 20 ; "1.2.840.10008.1.2.1\0"
        0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x38, 0x34, 0x30,
        0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x31, 0x2e, 0x32, 0x2e, 0x31, 0x00,
        // Implementation Class UID (0002,0012) ; UI ; 20 ; "1.2.345.6.7890.1.234"
        0x02, 0x00, 0x12, 0x00, b'U', b'I', 0x14, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x33, 0x34, 0x35,
        0x2e, 0x36, 0x2e, 0x37, 0x38, 0x39, 0x30, 0x2e, 0x31, 0x2e, 0x32, 0x33, 0x34,
        // Implementation Version Name (0002,0013) ; SH ; 14 ; "RUSTY_DICOM_26"
        0x02, 0x00, 0x13, 0x00, b'S', b'H', 0x0e, 0x00, 0x52, 0x55, 0x53, 0x54, 0x59, 0x5f, 0x44,
        0x49, 0x43, 0x4f, 0x4d, 0x5f, 0x32, 0x36,
    ];

    fn with_preamble(meta: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; 128];
        data.extend_from_slice(meta);
        data
    }

    #[test]
    fn read_meta_group_from_buffer() {
        let data = with_preamble(TEST_META_1);
        let (meta, meta_end) = read_meta_group(&data).unwrap();

        assert_eq!(meta_end, data.len());
        assert_eq!(
            meta.element(tags::FILE_META_INFORMATION_GROUP_LENGTH)
                .unwrap()
                .value()
                .primitive()
                .unwrap()
                .uint32()
                .unwrap(),
            92
        );
        assert_eq!(
            meta.element(tags::TRANSFER_SYNTAX_UID)
                .unwrap()
                .value()
                .to_str()
                .unwrap(),
            "1.2.840.10008.1.2.1"
        );
        assert_eq!(
            meta.element(tags::IMPLEMENTATION_VERSION_NAME)
                .unwrap()
                .value()
                .to_str()
                .unwrap(),
            "RUSTY_DICOM_26"
        );
    }

    #[test]
    fn meta_group_length_is_exact_on_write() {
        let data = with_preamble(TEST_META_1);
        let (meta, _) = read_meta_group(&data).unwrap();

        let out = write_meta_group(&meta).unwrap();
        // parse it back: prepend a preamble and magic code
        let mut data2 = vec![0u8; 128];
        data2.extend_from_slice(&DICM_MAGIC_CODE);
        data2.extend_from_slice(&out);
        let (meta2, meta_end2) = read_meta_group(&data2).unwrap();

        assert_eq!(meta_end2, data2.len(), "group length must cover the group exactly");
        // the writer owns the implementation identification
        assert_eq!(
            meta2
                .element(tags::IMPLEMENTATION_CLASS_UID)
                .unwrap()
                .value()
                .to_str()
                .unwrap(),
            IMPLEMENTATION_CLASS_UID
        );
        assert_eq!(
            meta2
                .element(tags::IMPLEMENTATION_VERSION_NAME)
                .unwrap()
                .value()
                .to_str()
                .unwrap(),
            IMPLEMENTATION_VERSION_NAME
        );
        // pass-through elements survive
        assert_eq!(
            meta2.element(tags::TRANSFER_SYNTAX_UID).unwrap().value(),
            meta.element(tags::TRANSFER_SYNTAX_UID).unwrap().value()
        );
        assert!(meta2
            .element(tags::FILE_META_INFORMATION_VERSION)
            .unwrap()
            .length()
            .is_defined());
    }
}
