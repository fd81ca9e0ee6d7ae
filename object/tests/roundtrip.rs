//! Whole-file round trip tests over hand-crafted DICOM buffers.

use dicoview_core::value::PrimitiveValue;
use dicoview_core::{tags, DataElement, HasLength, Length, Tag, Value, VR};
use dicoview_encoding::transfer_syntax::EXPLICIT_VR_LITTLE_ENDIAN;
use dicoview_object::{Action, DataSet, FileDataSet, InMemElement, RuleSet};

/// File meta group bytes for the given transfer syntax UID
/// (UID must have an even number of characters).
fn meta_group(ts_uid: &[u8]) -> Vec<u8> {
    assert_eq!(ts_uid.len() % 2, 0);
    let mut out = Vec::new();
    out.extend_from_slice(b"DICM");
    // (0002,0000) FileMetaInformationGroupLength, UL, 4
    let group_len = (8 + ts_uid.len()) as u32;
    out.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00]);
    out.extend_from_slice(&group_len.to_le_bytes());
    // (0002,0010) TransferSyntaxUID, UI
    out.extend_from_slice(&[0x02, 0x00, 0x10, 0x00, b'U', b'I']);
    out.extend_from_slice(&(ts_uid.len() as u16).to_le_bytes());
    out.extend_from_slice(ts_uid);
    out
}

/// The minimal implicit VR little endian file:
/// a 1×1 monochrome image with the single value 42.
fn minimal_implicit_file() -> Vec<u8> {
    let mut data = vec![0u8; 128];
    data.extend_from_slice(&meta_group(b"1.2.840.10008.1.2\0"));

    let implicit_us = |data: &mut Vec<u8>, tag: [u8; 4], value: u16| {
        data.extend_from_slice(&tag);
        data.extend_from_slice(&[0x02, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&value.to_le_bytes());
    };

    // (0028,0002) SamplesPerPixel = 1
    implicit_us(&mut data, [0x28, 0x00, 0x02, 0x00], 1);
    // (0028,0004) PhotometricInterpretation = "MONOCHROME2 "
    data.extend_from_slice(&[0x28, 0x00, 0x04, 0x00, 0x0c, 0x00, 0x00, 0x00]);
    data.extend_from_slice(b"MONOCHROME2 ");
    // (0028,0010) Rows = 1 ; (0028,0011) Columns = 1
    implicit_us(&mut data, [0x28, 0x00, 0x10, 0x00], 1);
    implicit_us(&mut data, [0x28, 0x00, 0x11, 0x00], 1);
    // (0028,0100) BitsAllocated = 8 ; (0028,0103) PixelRepresentation = 0
    implicit_us(&mut data, [0x28, 0x00, 0x00, 0x01], 8);
    implicit_us(&mut data, [0x28, 0x00, 0x03, 0x01], 0);
    // (7FE0,0010) PixelData, 2 bytes: the value 42 and its padding
    data.extend_from_slice(&[0xe0, 0x7f, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00, 42, 0]);
    data
}

/// The offset at which the data set proper starts in a crafted file.
fn data_set_start(data: &[u8]) -> usize {
    let gl = u32::from_le_bytes([data[140], data[141], data[142], data[143]]) as usize;
    144 + gl
}

#[test]
fn parse_minimal_implicit_file() {
    let data = minimal_implicit_file();
    let file = FileDataSet::parse(&data).expect("file should parse");

    assert_eq!(file.transfer_syntax().uid, "1.2.840.10008.1.2");
    assert!(file.transfer_syntax().implicit_vr());

    let rows = file.element(tags::ROWS).unwrap();
    assert_eq!(rows.vr(), VR::US);
    assert_eq!(rows.value().primitive().unwrap().uint16().unwrap(), 1);

    let pi = file.element(tags::PHOTOMETRIC_INTERPRETATION).unwrap();
    assert_eq!(pi.value().to_str().unwrap(), "MONOCHROME2");

    // 8-bit unsigned pixel data, with the padding byte read along
    let pixels = file.element(tags::PIXEL_DATA).unwrap();
    assert_eq!(
        pixels.value().primitive().unwrap().uint8_slice().unwrap(),
        &[42, 0]
    );

    // value spans obey the explicit length
    let span = rows.span().expect("parsed elements carry spans");
    assert_eq!(span.len(), rows.length().get().unwrap() as u64);
}

#[test]
fn write_minimal_implicit_file_is_byte_exact_after_meta() {
    let data = minimal_implicit_file();
    let file = FileDataSet::parse(&data).expect("file should parse");
    let out = file.write().expect("file should write");

    // preamble and magic code are preserved
    assert_eq!(&out[..128], &data[..128]);
    assert_eq!(&out[128..132], b"DICM");

    // the data set is reproduced bit-exactly; only the File Meta group
    // differs, through the writer-controlled elements
    assert_eq!(
        &out[data_set_start(&out)..],
        &data[data_set_start(&data)..],
    );

    // parsing the output yields the same structure
    let file2 = FileDataSet::parse(&out).expect("output should parse");
    for elem in file.elements() {
        use dicoview_core::Header;
        let tag = elem.tag();
        if tag == tags::IMPLEMENTATION_CLASS_UID
            || tag == tags::IMPLEMENTATION_VERSION_NAME
            || tag == tags::FILE_META_INFORMATION_GROUP_LENGTH
        {
            continue;
        }
        assert_eq!(file2.element(tag).unwrap(), elem, "element {} differs", tag);
    }
}

/// Big endian explicit data set: File Meta stays little endian,
/// only the data set flips.
#[test]
fn parse_big_endian_data_set() {
    let mut data = vec![0u8; 128];
    data.extend_from_slice(&meta_group(b"1.2.840.10008.1.2.2\0"));

    #[rustfmt::skip]
    data.extend_from_slice(&[
        // (0028,0010) Rows = 2, big endian
        0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02, 0x00, 0x02,
        // (0028,0011) Columns = 2
        0x00, 0x28, 0x00, 0x11, b'U', b'S', 0x00, 0x02, 0x00, 0x02,
        // (0028,0100) BitsAllocated = 16
        0x00, 0x28, 0x01, 0x00, b'U', b'S', 0x00, 0x02, 0x00, 0x10,
        // (7FE0,0010) PixelData, OW, 8 bytes
        0x7F, 0xE0, 0x00, 0x10, b'O', b'W', 0x00, 0x00, 0x00, 0x00, 0x00, 0x08,
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
    ]);

    let file = FileDataSet::parse(&data).expect("file should parse");
    assert_eq!(file.transfer_syntax().uid, "1.2.840.10008.1.2.2");

    assert_eq!(
        file.element(tags::ROWS)
            .unwrap()
            .value()
            .primitive()
            .unwrap()
            .uint16()
            .unwrap(),
        2
    );

    // word values flip from the wire order into native order
    assert_eq!(
        file.element(tags::PIXEL_DATA)
            .unwrap()
            .value()
            .primitive()
            .unwrap()
            .uint16_slice()
            .unwrap(),
        &[0x0102, 0x0304, 0x0506, 0x0708]
    );

    // the big endian data set writes back bit-exactly
    let out = file.write().expect("file should write");
    assert_eq!(
        &out[data_set_start(&out)..],
        &data[data_set_start(&data)..],
    );
}

#[test]
fn structural_round_trip_of_built_data_set() {
    let mut dataset = DataSet::create_empty();
    dataset.put(InMemElement::new(
        Tag(0x0008, 0x0060),
        VR::CS,
        PrimitiveValue::Strs(["MR".to_owned()].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x0028, 0x0009),
        VR::AT,
        PrimitiveValue::Tags([Tag(0x0018, 0x1063)].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x0028, 0x0010),
        VR::US,
        PrimitiveValue::U16([64].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x0028, 0x0030),
        VR::DS,
        PrimitiveValue::Strs(["1.5".to_owned(), "2.25".to_owned()].as_ref().into()),
    ));

    // one sequence with a single item holding two elements
    let mut item = DataSet::create_empty();
    item.put(InMemElement::new(
        Tag(0x0008, 0x0100),
        VR::SH,
        PrimitiveValue::Strs(["T-D1213 ".to_owned()].as_ref().into()),
    ));
    item.put(InMemElement::new(
        Tag(0x0008, 0x0104),
        VR::LO,
        PrimitiveValue::Strs(["Jaw region".to_owned()].as_ref().into()),
    ));
    dataset.put(DataElement::new(
        Tag(0x0008, 0x2218),
        VR::SQ,
        Value::Sequence {
            items: [item].as_ref().into(),
            size: Length::UNDEFINED,
        },
    ));

    let file = FileDataSet::from_dataset(dataset.clone(), &EXPLICIT_VR_LITTLE_ENDIAN);
    let out = file.write().expect("file should write");
    let parsed = FileDataSet::parse(&out).expect("output should parse");

    for elem in &dataset {
        use dicoview_core::Header;
        let parsed_elem = parsed.element(elem.tag()).unwrap();
        assert_eq!(parsed_elem, elem, "element {} differs", elem.tag());
    }
}

/// Anonymization rules: replace the patient name, keep the meta,
/// image presentation and pixel data groups, drop everything else.
#[test]
fn write_with_rules_anonymizes() {
    let mut dataset = DataSet::create_empty();
    dataset.put(InMemElement::new(
        Tag(0x0008, 0x0060),
        VR::CS,
        PrimitiveValue::Strs(["MR".to_owned()].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x0010, 0x0010),
        VR::PN,
        PrimitiveValue::Strs(["Doe^John".to_owned()].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x0010, 0x0030),
        VR::DA,
        PrimitiveValue::Strs(["19700101".to_owned()].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x0028, 0x0010),
        VR::US,
        PrimitiveValue::U16([1].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x0028, 0x0011),
        VR::US,
        PrimitiveValue::U16([2].as_ref().into()),
    ));
    dataset.put(InMemElement::new(
        Tag(0x7FE0, 0x0010),
        VR::OW,
        PrimitiveValue::I16([7, -3].as_ref().into()),
    ));

    let file = FileDataSet::from_dataset(dataset, &EXPLICIT_VR_LITTLE_ENDIAN);

    let rules = RuleSet::new()
        .rule("default", Action::Remove)
        .rule("PatientName", Action::Replace("Anonymized".into()))
        .rule("Meta Element", Action::Copy)
        .rule("Image Presentation", Action::Copy)
        .rule("Pixel Data", Action::Copy);

    let out = file.write_with_rules(&rules).expect("file should write");
    let parsed = FileDataSet::parse(&out).expect("output should parse");

    // the patient name is replaced
    assert_eq!(
        parsed
            .element(Tag(0x0010, 0x0010))
            .unwrap()
            .value()
            .to_str()
            .unwrap(),
        "Anonymized"
    );
    // image presentation, pixel data and file meta elements survive
    assert!(parsed.element(Tag(0x0028, 0x0010)).is_ok());
    assert!(parsed.element(Tag(0x0028, 0x0011)).is_ok());
    assert!(parsed.element(Tag(0x7FE0, 0x0010)).is_ok());
    assert!(parsed.element(tags::TRANSFER_SYNTAX_UID).is_ok());
    // everything else is dropped
    assert!(parsed.element(Tag(0x0008, 0x0060)).is_err());
    assert!(parsed.element(Tag(0x0010, 0x0030)).is_err());
}

/// The all-copy rule set is the identity over the written elements.
#[test]
fn copy_rules_are_identity() {
    let data = minimal_implicit_file();
    let file = FileDataSet::parse(&data).expect("file should parse");

    let rules = RuleSet::new().rule("default", Action::Copy);
    let out = file.write_with_rules(&rules).expect("file should write");
    let plain = file.write().expect("file should write");
    assert_eq!(out, plain);
}

#[test]
fn reject_non_dicom_buffers() {
    assert!(FileDataSet::parse(&[]).is_err());
    let mut data = vec![0u8; 132];
    data[128..132].copy_from_slice(b"DICO");
    assert!(FileDataSet::parse(&data).is_err());
}

#[test]
fn reject_unsupported_transfer_syntax() {
    let mut data = vec![0u8; 128];
    // RLE Lossless is recognized but not decodable here
    data.extend_from_slice(&meta_group(b"1.2.840.10008.1.2.5\0"));
    let err = FileDataSet::parse(&data).unwrap_err();
    assert!(err.to_string().contains("transfer syntax"));
}
