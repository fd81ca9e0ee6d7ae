//! This module contains a mid-level abstraction for writing DICOM content
//! as a stream of tokens, the inverse of [`read`](super::read).
//!
//! Explicit sequence and item lengths are never trusted from the incoming
//! tokens: the writer emits a placeholder and patches the exact byte count
//! once the matching end token arrives. Undefined lengths are preserved,
//! with the respective delimitation items rematerialized at the end.

use dicoview_core::header::{DataElementHeader, Length};
use dicoview_core::value::PrimitiveValue;
use dicoview_core::{tags, Tag, VR};
use dicoview_encoding::cursor::ByteWriter;
use dicoview_encoding::encode::{Encode, ExplicitVrEncoder, ImplicitVrEncoder};
use dicoview_encoding::text::{
    DefaultCharacterSetCodec, DynamicTextCodec, SpecificCharacterSet, TextCodec,
};
use dicoview_encoding::transfer_syntax::TransferSyntax;
use snafu::{Backtrace, ResultExt, Snafu};

use super::{DataToken, SeqTokenType};

/// An error while writing tokens into a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// A token arrived out of the grammar's order.
    #[snafu(display("Unexpected token {} at offset {}", token, offset))]
    UnexpectedToken {
        /// a rendering of the offending token
        token: String,
        /// the output offset at which it arrived
        offset: usize,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// A text value could not be encoded with the character set in effect.
    #[snafu(display("Could not encode text of element tagged {}", tag))]
    EncodeText {
        /// the tag of the element
        tag: Tag,
        /// the underlying text encoding error
        #[snafu(backtrace)]
        source: dicoview_encoding::text::Error,
    },
    /// A deferred sequence length could not be patched in.
    #[snafu(display("Could not patch sequence length at offset {}", offset))]
    PatchLength {
        /// the offset of the length field
        offset: usize,
        /// the underlying cursor error
        #[snafu(backtrace)]
        source: dicoview_encoding::cursor::Error,
    },
}

/// Result alias for data set writing.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A pending sequence or item whose boundary is not written out yet.
#[derive(Debug, Copy, Clone)]
struct PendingSeq {
    typ: SeqTokenType,
    /// whether the boundary is terminated by a delimitation item
    undefined: bool,
    /// offset of the 32-bit length field to patch (explicit length only)
    len_offset: usize,
    /// offset at which the value data begins
    base_offset: usize,
}

/// A writer-sink of DICOM data set tokens, producing the encoded bytes
/// for a given transfer syntax.
pub struct DataSetWriter {
    to: ByteWriter,
    encoder: Box<dyn Encode>,
    text: DynamicTextCodec,
    seq_tokens: Vec<PendingSeq>,
    last_header: Option<DataElementHeader>,
}

impl std::fmt::Debug for DataSetWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("DataSetWriter")
            .field("position", &self.to.position())
            .field("seq_tokens", &self.seq_tokens)
            .finish()
    }
}

impl DataSetWriter {
    /// Create a new data set writer
    /// encoding under the given transfer syntax,
    /// with the given initial character set.
    pub fn new(ts: &TransferSyntax, charset: SpecificCharacterSet) -> Self {
        let encoder: Box<dyn Encode> = if ts.explicit_vr {
            Box::new(ExplicitVrEncoder)
        } else {
            Box::new(ImplicitVrEncoder)
        };
        DataSetWriter {
            to: ByteWriter::new(ts.endianness),
            encoder,
            text: charset.codec(),
            seq_tokens: Vec::new(),
            last_header: None,
        }
    }

    /// The number of bytes written so far.
    pub fn position(&self) -> usize {
        self.to.position()
    }

    /// Consume the writer, returning the encoded data set bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.to.into_inner()
    }

    /// Feed a single token to the writer.
    pub fn write_token(&mut self, token: DataToken) -> Result<()> {
        match token {
            DataToken::ElementHeader(header) => {
                self.last_header = Some(header);
                Ok(())
            }
            DataToken::PrimitiveValue(value) => {
                let header = match self.last_header.take() {
                    Some(h) => h,
                    None => {
                        return UnexpectedTokenSnafu {
                            token: "PrimitiveValue".to_string(),
                            offset: self.to.position(),
                        }
                        .fail()
                    }
                };
                self.write_primitive(header, &value)
            }
            DataToken::SequenceStart { tag, len } => {
                let undefined = len.is_undefined();
                let header = DataElementHeader::new(
                    tag,
                    VR::SQ,
                    if undefined { Length::UNDEFINED } else { Length(0) },
                );
                self.encoder.encode_element_header(&mut self.to, &header);
                self.push_pending(SeqTokenType::Sequence, undefined);
                Ok(())
            }
            DataToken::PixelSequenceStart { header } => {
                let header =
                    DataElementHeader::new(header.tag, header.vr, Length::UNDEFINED);
                self.encoder.encode_element_header(&mut self.to, &header);
                self.push_pending(SeqTokenType::Sequence, true);
                Ok(())
            }
            DataToken::ItemStart { len } => {
                let undefined = len.is_undefined();
                self.encoder
                    .encode_item_header(&mut self.to, if undefined { 0xFFFF_FFFF } else { 0 });
                self.push_pending(SeqTokenType::Item, undefined);
                Ok(())
            }
            DataToken::ItemEnd => self.close_pending(SeqTokenType::Item),
            DataToken::SequenceEnd => self.close_pending(SeqTokenType::Sequence),
            DataToken::OffsetTable(table) => {
                self.encoder
                    .encode_item_header(&mut self.to, (table.len() * 4) as u32);
                self.to.write_u32_slice(&table);
                Ok(())
            }
            DataToken::ItemValue(data) => {
                self.encoder
                    .encode_item_header(&mut self.to, data.len() as u32);
                self.to.write_bytes(&data);
                Ok(())
            }
        }
    }

    /// Feed a full stream of tokens to the writer.
    pub fn write_sequence<I>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = DataToken>,
    {
        for token in tokens {
            self.write_token(token)?;
        }
        Ok(())
    }

    fn push_pending(&mut self, typ: SeqTokenType, undefined: bool) {
        let base_offset = self.to.position();
        self.seq_tokens.push(PendingSeq {
            typ,
            undefined,
            // the length field is always the last 4 header bytes
            len_offset: base_offset - 4,
            base_offset,
        });
    }

    fn close_pending(&mut self, typ: SeqTokenType) -> Result<()> {
        let pending = match self.seq_tokens.pop() {
            Some(p) if p.typ == typ => p,
            _ => {
                return UnexpectedTokenSnafu {
                    token: match typ {
                        SeqTokenType::Sequence => "SequenceEnd".to_string(),
                        SeqTokenType::Item => "ItemEnd".to_string(),
                    },
                    offset: self.to.position(),
                }
                .fail()
            }
        };
        if pending.undefined {
            match pending.typ {
                SeqTokenType::Sequence => self.encoder.encode_sequence_delimiter(&mut self.to),
                SeqTokenType::Item => self.encoder.encode_item_delimiter(&mut self.to),
            }
        } else {
            let len = (self.to.position() - pending.base_offset) as u32;
            self.to
                .patch_u32(pending.len_offset, len)
                .context(PatchLengthSnafu {
                    offset: pending.len_offset,
                })?;
        }
        Ok(())
    }

    fn write_primitive(
        &mut self,
        header: DataElementHeader,
        value: &PrimitiveValue,
    ) -> Result<()> {
        let data = self.encode_value(&header, value)?;
        let header = DataElementHeader::new(header.tag, header.vr, Length(data.len() as u32));
        self.encoder.encode_element_header(&mut self.to, &header);
        self.to.write_bytes(&data);

        // a Specific Character Set element switches the output text codec
        if header.tag == tags::SPECIFIC_CHARACTER_SET {
            if let Ok(terms) = value.strings() {
                if let Some(charset) = SpecificCharacterSet::from_terms(terms) {
                    self.text = charset.codec();
                }
            }
        }
        Ok(())
    }

    /// Encode a primitive value into its on-wire bytes,
    /// padded to an even length.
    fn encode_value(
        &self,
        header: &DataElementHeader,
        value: &PrimitiveValue,
    ) -> Result<Vec<u8>> {
        use PrimitiveValue::*;
        let mut tmp = ByteWriter::new(self.to.endianness());
        match value {
            Empty => {}
            U8(c) => {
                tmp.write_bytes(c);
            }
            I8(c) => {
                tmp.write_i8_slice(c);
            }
            U16(c) => {
                tmp.write_u16_slice(c);
            }
            I16(c) => {
                tmp.write_i16_slice(c);
            }
            U32(c) => {
                tmp.write_u32_slice(c);
            }
            I32(c) => {
                tmp.write_i32_slice(c);
            }
            I64(c) => {
                tmp.write_i64_slice(c);
            }
            F32(c) => {
                tmp.write_f32_slice(c);
            }
            F64(c) => {
                tmp.write_f64_slice(c);
            }
            Tags(c) => {
                for tag in c {
                    tmp.write_u16(tag.group());
                    tmp.write_u16(tag.element());
                }
            }
            Str(s) => {
                let encoded = self.encode_text(header, s)?;
                tmp.write_bytes(&encoded);
            }
            Strs(c) => {
                let joined = c.join("\\");
                let encoded = self.encode_text(header, &joined)?;
                tmp.write_bytes(&encoded);
            }
        }
        let mut data = tmp.into_inner();
        if data.len() % 2 != 0 {
            data.push(value_pad_byte(header.vr));
        }
        Ok(data)
    }

    fn encode_text(&self, header: &DataElementHeader, text: &str) -> Result<Vec<u8>> {
        if header.vr.uses_specific_charset() {
            self.text.encode(text)
        } else {
            DefaultCharacterSetCodec.encode(text)
        }
        .context(EncodeTextSnafu { tag: header.tag })
    }
}

/// The byte used to pad odd-length values to an even length:
/// NUL for UIDs and binary content, space for text.
fn value_pad_byte(vr: VR) -> u8 {
    match vr {
        VR::UI | VR::OB | VR::UN => 0x00,
        _ => b' ',
    }
}
