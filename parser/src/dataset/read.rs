//! This module contains a mid-level abstraction for reading DICOM content
//! sequentially from an in-memory buffer.
//!
//! At this level, headers and values are treated as tokens which can be
//! used to form a syntax tree of a full data set.

use dicoview_core::dictionary::StandardDataDictionary;
use dicoview_core::header::{DataElementHeader, Header, Length, SequenceItemHeader};
use dicoview_core::value::{C, PrimitiveValue};
use dicoview_core::{tags, Tag, VR};
use dicoview_encoding::cursor::ByteCursor;
use dicoview_encoding::decode::{Decode, ExplicitVrDecoder, ImplicitVrDecoder};
use dicoview_encoding::text::{
    DefaultCharacterSetCodec, DynamicTextCodec, SpecificCharacterSet, TextCodec,
};
use dicoview_encoding::transfer_syntax::TransferSyntax;
use snafu::{Backtrace, ResultExt, Snafu};
use std::cmp::Ordering;

use super::{DataToken, SeqTokenType};

/// An error while reading tokens from a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Failed to decode a data element header.
    #[snafu(display("Could not read element header at offset {}", offset))]
    ReadHeader {
        /// offset of the element header
        offset: usize,
        /// the underlying decoding error
        #[snafu(backtrace)]
        source: dicoview_encoding::decode::Error,
    },
    /// Failed to decode a sequence item header.
    #[snafu(display("Could not read item header at offset {}", offset))]
    ReadItemHeader {
        /// offset of the item header
        offset: usize,
        /// the underlying decoding error
        #[snafu(backtrace)]
        source: dicoview_encoding::decode::Error,
    },
    /// Failed to read the value bytes of a data element.
    #[snafu(display(
        "Could not read {} value bytes for element tagged {} at offset {}",
        len,
        tag,
        offset
    ))]
    ReadValue {
        /// the length of the value
        len: usize,
        /// the tag of the element
        tag: Tag,
        /// offset of the element value
        offset: usize,
        /// the underlying cursor error
        #[snafu(backtrace)]
        source: dicoview_encoding::cursor::Error,
    },
    /// Failed to decode element text.
    #[snafu(display("Could not decode text at offset {}", offset))]
    DecodeText {
        /// offset of the element value
        offset: usize,
        /// the underlying text decoding error
        #[snafu(backtrace)]
        source: dicoview_encoding::text::Error,
    },
    /// A primitive element carried an undefined length.
    #[snafu(display(
        "Undefined value length of element tagged {} at offset {}",
        tag,
        offset
    ))]
    UndefinedValueLength {
        /// the tag of the element
        tag: Tag,
        /// offset of the element value
        offset: usize,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// An explicit-length sequence or item was left inconsistently.
    #[snafu(display(
        "Inconsistent sequence end: expected end at {} bytes but read {}",
        end_of_sequence,
        bytes_read
    ))]
    InconsistentSequenceEnd {
        /// the offset where the sequence was declared to end
        end_of_sequence: usize,
        /// the offset effectively reached
        bytes_read: usize,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// An item header appeared outside of any sequence.
    #[snafu(display("Unexpected item header outside a sequence at offset {}", offset))]
    UnexpectedItemHeader {
        /// offset of the item header
        offset: usize,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// A pixel data fragment item carried an undefined length.
    #[snafu(display("Undefined pixel data item length at offset {}", offset))]
    UndefinedItemLength {
        /// offset of the item header
        offset: usize,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
}

/// Result alias for data set reading.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A reader-specific token representing a sequence or item start.
#[derive(Debug, Copy, Clone, PartialEq)]
struct SeqToken {
    /// Whether it is the start of a sequence or the start of an item.
    typ: SeqTokenType,
    /// The length of the value, as indicated by the starting element,
    /// can be unknown.
    len: Length,
    /// Whether this sequence token is part of an encapsulated pixel data.
    pixel_data: bool,
    /// The offset at which the sequence or item value data begins.
    base_offset: usize,
}

/// A higher-level reader for retrieving structure in a DICOM data set
/// from a byte buffer, as an iterator of [`DataToken`]s.
///
/// The reader is driven by the state machine of the data set grammar:
/// a data element is read as a header token followed by a value token,
/// sequences and items open and close through their own boundary tokens
/// (delimiter driven when their length is undefined, offset driven when it
/// is explicit), and encapsulated pixel data unfolds into an offset table
/// and one token per fragment.
pub struct DataSetReader<'a> {
    /// the cursor over the input buffer
    cursor: ByteCursor<'a>,
    /// the element header decoder for the transfer syntax in effect
    decoder: Box<dyn Decode>,
    /// the current reading position
    position: usize,
    /// the offset at which the data set ends
    end: usize,
    /// the text codec for specific-charset text values,
    /// switched by Specific Character Set elements on the fly
    text: DynamicTextCodec,
    /// the last Bits Allocated value seen, for typing pixel data
    bits_allocated: Option<u16>,
    /// the last Pixel Representation value seen, for typing pixel data
    pixel_representation: Option<u16>,
    /// whether the reader is expecting an item header next
    /// (or a sequence delimiter)
    in_sequence: bool,
    /// whether the reader is expecting the first item value of a pixel
    /// sequence next (offset table)
    offset_table_next: bool,
    /// whether a check for a sequence or item delimitation is pending
    delimiter_check_pending: bool,
    /// a stack of delimiters
    seq_delimiters: Vec<SeqToken>,
    /// fuse the iteration process if true
    hard_break: bool,
    /// last decoded header
    last_header: Option<DataElementHeader>,
}

impl std::fmt::Debug for DataSetReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("DataSetReader")
            .field("position", &self.position)
            .field("end", &self.end)
            .field("in_sequence", &self.in_sequence)
            .field("seq_delimiters", &self.seq_delimiters)
            .finish()
    }
}

impl<'a> DataSetReader<'a> {
    /// Create a new token reader over the given buffer slice,
    /// decoding under the given transfer syntax,
    /// with the given initial character set.
    pub fn new(
        data: &'a [u8],
        ts: &TransferSyntax,
        charset: SpecificCharacterSet,
        start: usize,
        end: usize,
    ) -> Self {
        let cursor = ByteCursor::new(data, ts.endianness);
        let decoder: Box<dyn Decode> = if ts.explicit_vr {
            Box::new(ExplicitVrDecoder)
        } else {
            Box::new(ImplicitVrDecoder::<StandardDataDictionary>::default())
        };
        DataSetReader {
            cursor,
            decoder,
            position: start,
            end,
            text: charset.codec(),
            bits_allocated: None,
            pixel_representation: None,
            in_sequence: false,
            offset_table_next: false,
            delimiter_check_pending: false,
            seq_delimiters: Vec::new(),
            hard_break: false,
            last_header: None,
        }
    }

    /// The current reading position, in bytes from the buffer start.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for DataSetReader<'_> {
    type Item = Result<DataToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.hard_break {
            return None;
        }

        // item or sequence delimitation logic for explicit lengths
        if self.delimiter_check_pending {
            match self.update_seq_delimiters() {
                Err(e) => {
                    self.hard_break = true;
                    return Some(Err(e));
                }
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => { /* no-op */ }
            }
        }

        if self.in_sequence {
            // at sequence level, expecting item header
            let offset = self.position;
            match self.decoder.decode_item_header(&self.cursor, offset) {
                Ok((header, pos)) => {
                    self.position = pos;
                    match header {
                        SequenceItemHeader::Item { len } => {
                            // entered a new item
                            self.in_sequence = false;
                            let pixel_data = match self.seq_delimiters.last() {
                                Some(d) => d.pixel_data,
                                None => {
                                    return Some(UnexpectedItemHeaderSnafu { offset }.fail())
                                }
                            };
                            self.push_sequence_token(SeqTokenType::Item, len, pixel_data);
                            // items can be empty
                            if len == Length(0) {
                                self.delimiter_check_pending = true;
                            }
                            Some(Ok(DataToken::ItemStart { len }))
                        }
                        SequenceItemHeader::ItemDelimiter => {
                            // closed an item
                            self.seq_delimiters.pop();
                            self.in_sequence = true;
                            // sequences can end after an item delimiter
                            self.delimiter_check_pending = true;
                            Some(Ok(DataToken::ItemEnd))
                        }
                        SequenceItemHeader::SequenceDelimiter => {
                            // closed a sequence
                            self.seq_delimiters.pop();
                            self.in_sequence = false;
                            // items can end after a nested sequence ends
                            self.delimiter_check_pending = true;
                            Some(Ok(DataToken::SequenceEnd))
                        }
                    }
                }
                Err(e) => {
                    self.hard_break = true;
                    Some(Err(e).context(ReadItemHeaderSnafu { offset }))
                }
            }
        } else if let Some(SeqToken {
            typ: SeqTokenType::Item,
            pixel_data: true,
            len,
            ..
        }) = self.seq_delimiters.last()
        {
            // a pixel sequence item value is expected
            let len = match len.get() {
                Some(len) => len as usize,
                None => {
                    return Some(
                        UndefinedItemLengthSnafu {
                            offset: self.position,
                        }
                        .fail(),
                    )
                }
            };
            let offset = self.position;

            // need to pop the item on the next iteration
            self.delimiter_check_pending = true;

            if self.offset_table_next {
                // basic offset table
                self.offset_table_next = false;
                Some(
                    match self.cursor.read_u32_slice(offset, len) {
                        Ok(table) => {
                            self.position += len;
                            Ok(DataToken::OffsetTable(table))
                        }
                        Err(e) => Err(e).context(ReadValueSnafu {
                            len,
                            tag: tags::PIXEL_DATA,
                            offset,
                        }),
                    },
                )
            } else {
                // fragment value
                Some(match self.cursor.read_exact(offset, len) {
                    Ok(bytes) => {
                        self.position += len;
                        Ok(DataToken::ItemValue(bytes.to_vec()))
                    }
                    Err(e) => Err(e).context(ReadValueSnafu {
                        len,
                        tag: tags::PIXEL_DATA,
                        offset,
                    }),
                })
            }
        } else if let Some(header) = self.last_header {
            if header.is_encapsulated_pixeldata() {
                self.push_sequence_token(SeqTokenType::Sequence, Length::UNDEFINED, true);
                self.last_header = None;

                // encapsulated pixel data, expecting the offset table item
                let offset = self.position;
                match self.decoder.decode_item_header(&self.cursor, offset) {
                    Ok((item, pos)) => {
                        self.position = pos;
                        match item {
                            SequenceItemHeader::Item { len } => {
                                self.in_sequence = false;
                                self.push_sequence_token(SeqTokenType::Item, len, true);
                                // the offset table item can be empty
                                if len == Length(0) {
                                    self.delimiter_check_pending = true;
                                } else {
                                    self.offset_table_next = true;
                                }
                                Some(Ok(DataToken::ItemStart { len }))
                            }
                            SequenceItemHeader::SequenceDelimiter => {
                                // empty pixel data
                                self.seq_delimiters.pop();
                                self.in_sequence = false;
                                Some(Ok(DataToken::SequenceEnd))
                            }
                            SequenceItemHeader::ItemDelimiter => {
                                self.hard_break = true;
                                Some(UnexpectedItemHeaderSnafu { offset }.fail())
                            }
                        }
                    }
                    Err(e) => {
                        self.hard_break = true;
                        Some(Err(e).context(ReadItemHeaderSnafu { offset }))
                    }
                }
            } else {
                // a plain element header was read, so a value is expected
                let value = match self.read_value(&header) {
                    Ok(v) => v,
                    Err(e) => {
                        self.hard_break = true;
                        self.last_header = None;
                        return Some(Err(e));
                    }
                };

                self.last_header = None;

                // sequences can end after this token
                self.delimiter_check_pending = true;

                Some(Ok(DataToken::PrimitiveValue(value)))
            }
        } else {
            // a data element header or item delimiter is expected
            if self.position >= self.end {
                self.hard_break = true;
                return None;
            }
            let offset = self.position;
            match self.decoder.decode_header(&self.cursor, offset) {
                Ok((
                    DataElementHeader {
                        tag,
                        vr: VR::SQ,
                        len,
                    },
                    pos,
                )) => {
                    self.position = pos;
                    self.in_sequence = true;
                    self.push_sequence_token(SeqTokenType::Sequence, len, false);

                    // sequences can end right after they start
                    if len == Length(0) {
                        self.delimiter_check_pending = true;
                    }

                    Some(Ok(DataToken::SequenceStart { tag, len }))
                }
                Ok((
                    DataElementHeader {
                        tag: Tag(0xFFFE, 0xE00D),
                        ..
                    },
                    pos,
                )) if self.seq_delimiters.is_empty() => {
                    // ignore delimiter, we are not in a sequence
                    tracing::warn!(
                        "Item delimitation item outside of a sequence at offset {}",
                        offset
                    );
                    self.position = pos;
                    // return a new token by calling the method again
                    self.next()
                }
                Ok((
                    DataElementHeader {
                        tag: Tag(0xFFFE, 0xE00D),
                        ..
                    },
                    pos,
                )) => {
                    self.position = pos;
                    self.in_sequence = true;
                    // pop item delimiter
                    self.seq_delimiters.pop();
                    // sequences can end after this token
                    self.delimiter_check_pending = true;
                    Some(Ok(DataToken::ItemEnd))
                }
                Ok((header, pos)) if header.is_encapsulated_pixeldata() => {
                    self.position = pos;
                    // encapsulated pixel data:
                    // expect a sequence of pixel data fragments
                    self.last_header = Some(header);
                    Some(Ok(DataToken::PixelSequenceStart { header }))
                }
                Ok((header, pos)) if header.len.is_undefined() => {
                    // treat other undefined length elements as data set
                    // sequences, discarding the VR in the process;
                    // anything not terminated by delimiter items
                    // fails down the line
                    self.position = pos;
                    self.in_sequence = true;

                    let DataElementHeader { tag, len, .. } = header;
                    self.push_sequence_token(SeqTokenType::Sequence, len, false);

                    Some(Ok(DataToken::SequenceStart { tag, len }))
                }
                Ok((header, pos)) => {
                    self.position = pos;
                    // save it for the next step
                    self.last_header = Some(header);
                    Some(Ok(DataToken::ElementHeader(header)))
                }
                Err(e) => {
                    self.hard_break = true;
                    Some(Err(e).context(ReadHeaderSnafu { offset }))
                }
            }
        }
    }
}

impl DataSetReader<'_> {
    fn update_seq_delimiters(&mut self) -> Result<Option<DataToken>> {
        if let Some(sd) = self.seq_delimiters.last() {
            if let Some(len) = sd.len.get() {
                let end_of_sequence = sd.base_offset + len as usize;
                let bytes_read = self.position;
                match end_of_sequence.cmp(&bytes_read) {
                    Ordering::Equal => {
                        // end of delimiter, as indicated by the element's length
                        let token = match sd.typ {
                            SeqTokenType::Sequence => {
                                self.in_sequence = false;
                                DataToken::SequenceEnd
                            }
                            SeqTokenType::Item => {
                                self.in_sequence = true;
                                DataToken::ItemEnd
                            }
                        };
                        self.seq_delimiters.pop();
                        return Ok(Some(token));
                    }
                    Ordering::Less => {
                        return InconsistentSequenceEndSnafu {
                            end_of_sequence,
                            bytes_read,
                        }
                        .fail();
                    }
                    Ordering::Greater => {} // continue normally
                }
            }
        }
        self.delimiter_check_pending = false;
        Ok(None)
    }

    #[inline]
    fn push_sequence_token(&mut self, typ: SeqTokenType, len: Length, pixel_data: bool) {
        self.seq_delimiters.push(SeqToken {
            typ,
            pixel_data,
            len,
            base_offset: self.position,
        })
    }

    /// Read the value of the given element header
    /// with the coercion appropriate for its VR,
    /// advancing the reading position past the value.
    fn read_value(&mut self, header: &DataElementHeader) -> Result<PrimitiveValue> {
        let len = match header.len.get() {
            Some(len) => len as usize,
            None => {
                return UndefinedValueLengthSnafu {
                    tag: header.tag,
                    offset: self.position,
                }
                .fail()
            }
        };
        if len == 0 {
            return Ok(PrimitiveValue::Empty);
        }

        let offset = self.position;
        let tag = header.tag;
        let value_ctx = ReadValueSnafu { len, tag, offset };

        let value = if tag == tags::PIXEL_DATA
            && matches!(header.vr, VR::OB | VR::OW | VR::OF | VR::UN)
        {
            self.read_pixel_value(header, offset, len)?
        } else {
            match header.vr {
                VR::OB => {
                    PrimitiveValue::I8(self.cursor.read_i8_slice(offset, len).context(value_ctx)?)
                }
                VR::OW => {
                    PrimitiveValue::I16(self.cursor.read_i16_slice(offset, len).context(value_ctx)?)
                }
                VR::OF => {
                    PrimitiveValue::I32(self.cursor.read_i32_slice(offset, len).context(value_ctx)?)
                }
                VR::OD => {
                    PrimitiveValue::I64(self.cursor.read_i64_slice(offset, len).context(value_ctx)?)
                }
                VR::UN => {
                    PrimitiveValue::U8(self.cursor.read_u8_slice(offset, len).context(value_ctx)?)
                }
                VR::US => {
                    PrimitiveValue::U16(self.cursor.read_u16_slice(offset, len).context(value_ctx)?)
                }
                VR::SS => {
                    PrimitiveValue::I16(self.cursor.read_i16_slice(offset, len).context(value_ctx)?)
                }
                VR::UL => {
                    PrimitiveValue::U32(self.cursor.read_u32_slice(offset, len).context(value_ctx)?)
                }
                VR::SL => {
                    PrimitiveValue::I32(self.cursor.read_i32_slice(offset, len).context(value_ctx)?)
                }
                VR::FL => {
                    PrimitiveValue::F32(self.cursor.read_f32_slice(offset, len).context(value_ctx)?)
                }
                VR::FD => {
                    PrimitiveValue::F64(self.cursor.read_f64_slice(offset, len).context(value_ctx)?)
                }
                VR::AT => self.read_value_tags(header, offset, len)?,
                VR::ST | VR::LT | VR::UT => self.read_value_str(header, offset, len)?,
                _ => self.read_value_strs(header, offset, len)?,
            }
        };
        self.position += len;

        // keep the pixel data typing context up to date
        match tag {
            tags::BITS_ALLOCATED => {
                self.bits_allocated = value.uint16().ok();
            }
            tags::PIXEL_REPRESENTATION => {
                self.pixel_representation = value.uint16().ok();
            }
            tags::SPECIFIC_CHARACTER_SET => {
                self.update_charset(&value);
            }
            _ => {}
        }

        Ok(value)
    }

    fn read_value_tags(
        &self,
        header: &DataElementHeader,
        offset: usize,
        len: usize,
    ) -> Result<PrimitiveValue> {
        let value_ctx = ReadValueSnafu {
            len,
            tag: header.tag,
            offset,
        };
        let ntags = len >> 2;
        let mut parts = C::with_capacity(ntags);
        for i in 0..ntags {
            let group = self.cursor.read_u16(offset + i * 4).context(value_ctx)?;
            let element = self
                .cursor
                .read_u16(offset + i * 4 + 2)
                .context(value_ctx)?;
            parts.push(Tag(group, element));
        }
        Ok(PrimitiveValue::Tags(parts))
    }

    fn read_value_str(
        &self,
        header: &DataElementHeader,
        offset: usize,
        len: usize,
    ) -> Result<PrimitiveValue> {
        let bytes = self.cursor.read_exact(offset, len).context(ReadValueSnafu {
            len,
            tag: header.tag,
            offset,
        })?;
        let text = if header.vr.uses_specific_charset() {
            self.text.decode(bytes)
        } else {
            DefaultCharacterSetCodec.decode(bytes)
        }
        .context(DecodeTextSnafu { offset })?;
        Ok(PrimitiveValue::Str(text))
    }

    fn read_value_strs(
        &self,
        header: &DataElementHeader,
        offset: usize,
        len: usize,
    ) -> Result<PrimitiveValue> {
        let bytes = self.cursor.read_exact(offset, len).context(ReadValueSnafu {
            len,
            tag: header.tag,
            offset,
        })?;
        let use_specific = header.vr.uses_specific_charset();
        let parts: Result<C<String>> = bytes
            .split(|b| *b == b'\\')
            .map(|slice| {
                if use_specific {
                    self.text.decode(slice)
                } else {
                    DefaultCharacterSetCodec.decode(slice)
                }
                .context(DecodeTextSnafu { offset })
            })
            .collect();
        Ok(PrimitiveValue::Strs(parts?))
    }

    /// Read a pixel data value with an explicit length,
    /// typed according to Bits Allocated and Pixel Representation.
    fn read_pixel_value(
        &self,
        header: &DataElementHeader,
        offset: usize,
        len: usize,
    ) -> Result<PrimitiveValue> {
        let bits = match self.bits_allocated {
            Some(bits) => bits,
            None => {
                tracing::warn!(
                    "Bits Allocated not present before Pixel Data, assuming 16 bits"
                );
                16
            }
        };
        let signed = self.pixel_representation == Some(1);

        if header.vr == VR::OW && bits == 8 {
            tracing::warn!("Reading 8-bit pixel data as OW");
        }
        if header.vr == VR::OB && bits == 16 {
            tracing::warn!("Reading 16-bit pixel data as OB");
        }

        let value_ctx = ReadValueSnafu {
            len,
            tag: header.tag,
            offset,
        };
        let value = match (bits, signed) {
            (8, false) => {
                PrimitiveValue::U8(self.cursor.read_u8_slice(offset, len).context(value_ctx)?)
            }
            (8, true) => {
                PrimitiveValue::I8(self.cursor.read_i8_slice(offset, len).context(value_ctx)?)
            }
            (16, false) => {
                PrimitiveValue::U16(self.cursor.read_u16_slice(offset, len).context(value_ctx)?)
            }
            (16, true) => {
                PrimitiveValue::I16(self.cursor.read_i16_slice(offset, len).context(value_ctx)?)
            }
            (32, false) => {
                PrimitiveValue::U32(self.cursor.read_u32_slice(offset, len).context(value_ctx)?)
            }
            (32, true) => {
                PrimitiveValue::I32(self.cursor.read_i32_slice(offset, len).context(value_ctx)?)
            }
            (bits, _) => {
                tracing::warn!("Unexpected Bits Allocated value {}, reading raw bytes", bits);
                PrimitiveValue::U8(self.cursor.read_u8_slice(offset, len).context(value_ctx)?)
            }
        };
        Ok(value)
    }

    /// Switch the active text codec as mandated by a
    /// Specific Character Set element value.
    /// With code extensions (multiple values), the second value is used;
    /// an unsupported term keeps the codec in effect.
    fn update_charset(&mut self, value: &PrimitiveValue) {
        if let Ok(terms) = value.strings() {
            if let Some(charset) = SpecificCharacterSet::from_terms(terms) {
                self.text = charset.codec();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSetReader, DataToken};
    use dicoview_core::header::{DataElementHeader, Length};
    use dicoview_core::value::PrimitiveValue;
    use dicoview_core::{Tag, VR};
    use dicoview_encoding::text::SpecificCharacterSet;
    use dicoview_encoding::transfer_syntax::{
        EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
    };

    fn validate_read_data_explicit_vr<I>(data: &[u8], ground_truth: I)
    where
        I: IntoIterator<Item = DataToken>,
    {
        let reader = DataSetReader::new(
            data,
            &EXPLICIT_VR_LITTLE_ENDIAN,
            SpecificCharacterSet::default(),
            0,
            data.len(),
        );
        validate_data_set_reader(data, reader, ground_truth);
    }

    fn validate_read_data_implicit_vr<I>(data: &[u8], ground_truth: I)
    where
        I: IntoIterator<Item = DataToken>,
    {
        let reader = DataSetReader::new(
            data,
            &IMPLICIT_VR_LITTLE_ENDIAN,
            SpecificCharacterSet::default(),
            0,
            data.len(),
        );
        validate_data_set_reader(data, reader, ground_truth);
    }

    fn validate_data_set_reader<I>(data: &[u8], mut reader: DataSetReader, ground_truth: I)
    where
        I: IntoIterator<Item = DataToken>,
    {
        let iter = &mut reader;
        for gt_token in ground_truth {
            let token = iter
                .next()
                .expect("expecting more tokens from reader")
                .expect("should fetch the next token without an error");
            assert_eq!(
                token, gt_token,
                "got token {token:2?} ; but expected {gt_token:2?}"
            );
        }

        let extra: Vec<_> = iter.collect();
        assert_eq!(extra.len(), 0, "extraneous tokens remaining: {extra:?}");
        assert_eq!(
            reader.position(),
            data.len(),
            "reader position did not match end of data",
        );
    }

    #[test]
    fn read_sequence_explicit() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, // sequence tag: (0018,6011) SequenceOfUltrasoundRegions
            b'S', b'Q', // VR
            0x00, 0x00, // reserved
            0x2e, 0x00, 0x00, 0x00, // length: 28 + 18 = 46 (#= 2)
            // -- 12 --
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x14, 0x00, 0x00, 0x00, // item length: 20 (#= 2)
            // -- 20 --
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x01, 0x00, // (0018,6012) RegionSpatialFormat, len = 2, value = 1
            // -- 30 --
            0x18, 0x00, 0x14, 0x60, b'U', b'S', 0x02, 0x00, 0x02, 0x00, // (0018,6014) RegionDataType, len = 2, value = 2
            // -- 40 --
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x0a, 0x00, 0x00, 0x00, // item length: 10 (#= 1)
            // -- 48 --
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x04, 0x00, // (0018,6012) RegionSpatialFormat, len = 2, value = 4
            // -- 58 --
            0x20, 0x00, 0x00, 0x40, b'L', b'T', 0x04, 0x00, // (0020,4000) ImageComments, len = 4
            b'T', b'E', b'S', b'T', // value = "TEST"
        ];

        let ground_truth = vec![
            DataToken::SequenceStart {
                tag: Tag(0x0018, 0x6011),
                len: Length(46),
            },
            DataToken::ItemStart { len: Length(20) },
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0018, 0x6012),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([1].as_ref().into())),
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0018, 0x6014),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([2].as_ref().into())),
            DataToken::ItemEnd,
            DataToken::ItemStart { len: Length(10) },
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0018, 0x6012),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([4].as_ref().into())),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0020, 0x4000),
                vr: VR::LT,
                len: Length(4),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::Str("TEST".into())),
        ];

        validate_read_data_explicit_vr(DATA, ground_truth);
    }

    #[test]
    fn read_sequence_implicit_undefined_len() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x08, 0x00, 0x15, 0x11, // sequence tag: (0008,1115) ReferencedSeriesSequence
            0xff, 0xff, 0xff, 0xff, // length: undefined
            // -- 8 --
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0xff, 0xff, 0xff, 0xff, // item length: undefined
            // -- 16 --
            0x08, 0x00, 0x50, 0x11, // (0008,1150) ReferencedSOPClassUID
            0x08, 0x00, 0x00, 0x00, // length: 8
            b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.',
            // -- 32 --
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
            // -- 40 --
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
        ];

        let ground_truth = vec![
            DataToken::SequenceStart {
                tag: Tag(0x0008, 0x1115),
                len: Length::UNDEFINED,
            },
            DataToken::ItemStart {
                len: Length::UNDEFINED,
            },
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0008, 0x1150),
                vr: VR::UI,
                len: Length(8),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::Strs(
                ["1.2.840.".to_owned()].as_ref().into(),
            )),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
        ];

        validate_read_data_implicit_vr(DATA, ground_truth);
    }

    #[test]
    fn read_encapsulated_pixeldata() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0xe0, 0x7f, 0x10, 0x00, // (7FE0,0010) PixelData
            b'O', b'B', // VR
            0x00, 0x00, // reserved
            0xff, 0xff, 0xff, 0xff, // length: undefined
            // -- 12 -- basic offset table
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x04, 0x00, 0x00, 0x00, // item length: 4
            // -- 20 --
            0x10, 0x00, 0x00, 0x00, // offset: 16
            // -- 24 -- first fragment
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x08, 0x00, 0x00, 0x00, // item length: 8
            // -- 32 --
            0x99, 0x99, 0x99, 0x99, 0x99, 0x99, 0x99, 0x99,
            // -- 40 -- end of pixel data
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];

        let pixel_header = DataElementHeader {
            tag: Tag(0x7FE0, 0x0010),
            vr: VR::OB,
            len: Length::UNDEFINED,
        };
        let ground_truth = vec![
            DataToken::PixelSequenceStart {
                header: pixel_header,
            },
            DataToken::ItemStart { len: Length(4) },
            DataToken::OffsetTable([16].as_ref().into()),
            DataToken::ItemEnd,
            DataToken::ItemStart { len: Length(8) },
            DataToken::ItemValue(vec![0x99; 8]),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
        ];

        validate_read_data_explicit_vr(DATA, ground_truth);
    }

    #[test]
    fn read_pixel_data_with_bits_allocated_context() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0028,0100) BitsAllocated, len = 2, value = 8
            0x28, 0x00, 0x00, 0x01, b'U', b'S', 0x02, 0x00, 0x08, 0x00,
            // (0028,0103) PixelRepresentation, len = 2, value = 0
            0x28, 0x00, 0x03, 0x01, b'U', b'S', 0x02, 0x00, 0x00, 0x00,
            // (7FE0,0010) PixelData, OW, len = 4
            0xe0, 0x7f, 0x10, 0x00, b'O', b'W', 0x00, 0x00, 0x04, 0x00, 0x00, 0x00,
            0x2a, 0x2b, 0x2c, 0x2d,
        ];

        let ground_truth = vec![
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0028, 0x0100),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([8].as_ref().into())),
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0028, 0x0103),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([0].as_ref().into())),
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x7FE0, 0x0010),
                vr: VR::OW,
                len: Length(4),
            }),
            // typed by Bits Allocated (8, unsigned), not by the OW coercion
            DataToken::PrimitiveValue(PrimitiveValue::U8(
                [0x2a, 0x2b, 0x2c, 0x2d].as_ref().into(),
            )),
        ];

        validate_read_data_explicit_vr(DATA, ground_truth);
    }

    #[test]
    fn charset_switch_applies_to_special_text() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0008,0005) SpecificCharacterSet, len = 10, "ISO_IR 144"
            0x08, 0x00, 0x05, 0x00, b'C', b'S', 0x0a, 0x00,
            b'I', b'S', b'O', b'_', b'I', b'R', b' ', b'1', b'4', b'4',
            // (0010,0010) PatientName, len = 4: "Иван" in ISO-8859-5
            0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00,
            0xB8, 0xD2, 0xD0, 0xDD,
        ];

        let ground_truth = vec![
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0008, 0x0005),
                vr: VR::CS,
                len: Length(10),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::Strs(
                ["ISO_IR 144".to_owned()].as_ref().into(),
            )),
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0010, 0x0010),
                vr: VR::PN,
                len: Length(4),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::Strs(
                ["\u{418}\u{432}\u{430}\u{43d}".to_owned()].as_ref().into(),
            )),
        ];

        validate_read_data_explicit_vr(DATA, ground_truth);
    }

    #[test]
    fn undefined_length_on_primitive_is_an_error() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0020,4000) ImageComments with undefined length,
            // not delimiter terminated
            0x20, 0x00, 0x00, 0x40, 0xff, 0xff, 0xff, 0xff,
            0x41, 0x41, 0x41, 0x41, 0x41, 0x41, 0x41, 0x41,
        ];
        let reader = DataSetReader::new(
            DATA,
            &IMPLICIT_VR_LITTLE_ENDIAN,
            SpecificCharacterSet::default(),
            0,
            DATA.len(),
        );
        let outcome: Result<Vec<_>, _> = reader.collect();
        assert!(outcome.is_err());
    }
}
