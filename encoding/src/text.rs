//! This module contains reusable components for encoding and decoding text
//! in DICOM data structures, including support for character repertoires.
//!
//! The mapping from _Specific Character Set_ terms to text codecs is
//! provided by [`SpecificCharacterSet`]. The default repertoire decodes as
//! ISO-8859-1, and only the VRs SH, LO, ST, PN, LT and UT are subject to
//! the specific character set in effect; all other textual values stay in
//! the default repertoire.

use encoding::all::{ISO_8859_1, UTF_8};
use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, EncoderTrap, Encoding, EncodingRef, RawDecoder, StringWriter};
use snafu::{Backtrace, Snafu};
use std::fmt::Debug;

/// An error occurring during text encoding or decoding.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// A failure to decode a sequence of bytes as text.
    #[snafu(display("Could not decode text with `{}`: {}", codec, message))]
    DecodeText {
        /// the name of the codec
        codec: &'static str,
        /// the failure message reported by the codec
        message: String,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// A failure to encode text into a sequence of bytes.
    #[snafu(display("Could not encode text with `{}`: {}", codec, message))]
    EncodeText {
        /// the name of the codec
        codec: &'static str,
        /// the failure message reported by the codec
        message: String,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
}

/// Result alias for text codec operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A holder of encoding and decoding mechanisms for text in DICOM content,
/// which according to the standard, depends on the specific character set.
pub trait TextCodec {
    /// Obtain a unique name of the text encoding,
    /// which may be used as the value of a
    /// Specific Character Set (0008,0005) element to refer to this codec.
    ///
    /// Should contain no leading or trailing spaces.
    fn name(&self) -> &'static str;

    /// Decode the given byte buffer as a single string. The resulting string
    /// _may_ contain backslash characters ('\') to delimit individual
    /// values, and should be split later on if required.
    fn decode(&self, text: &[u8]) -> Result<String>;

    /// Encode a text value into a byte vector. The input string can
    /// feature multiple text values by using the backslash character ('\')
    /// as the value delimiter.
    fn encode(&self, text: &str) -> Result<Vec<u8>>;
}

impl<T: ?Sized> TextCodec for Box<T>
where
    T: TextCodec,
{
    fn name(&self) -> &'static str {
        self.as_ref().name()
    }

    fn decode(&self, text: &[u8]) -> Result<String> {
        self.as_ref().decode(text)
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        self.as_ref().encode(text)
    }
}

impl<'a, T: ?Sized> TextCodec for &'a T
where
    T: TextCodec,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(&self, text: &[u8]) -> Result<String> {
        (**self).decode(text)
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        (**self).encode(text)
    }
}

/// Type alias for a type erased text codec.
///
/// It is important because stateful parsers may need to change the expected
/// text encoding format at run-time.
pub type DynamicTextCodec = Box<dyn TextCodec>;

/// An enum type for the supported character sets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub enum SpecificCharacterSet {
    /// The default character repertoire (ISO-8859-1 / ISO IR 6).
    Default,
    /// ISO IR 100: Latin alphabet No. 1 (iso-8859-1)
    IsoIr100,
    /// ISO IR 101: Latin alphabet No. 2 (iso-8859-2)
    IsoIr101,
    /// ISO IR 109: Latin alphabet No. 3 (iso-8859-3)
    IsoIr109,
    /// ISO IR 110: Latin alphabet No. 4 (iso-8859-4)
    IsoIr110,
    /// ISO IR 144: Cyrillic (iso-8859-5)
    IsoIr144,
    /// ISO IR 127: Arabic (iso-8859-6)
    IsoIr127,
    /// ISO IR 126: Greek (iso-8859-7)
    IsoIr126,
    /// ISO IR 138: Hebrew (iso-8859-8)
    IsoIr138,
    /// ISO IR 148: Latin alphabet No. 5 (iso-8859-9)
    IsoIr148,
    /// ISO IR 166: Thai (iso-8859-11)
    IsoIr166,
    /// ISO IR 13: Japanese (shift-jis)
    IsoIr13,
    /// ISO 2022 IR 87: Japanese with code extensions (iso-2022-jp)
    Iso2022Ir87,
    /// The Simplified Chinese character set defined in GB18030.
    Gb18030,
    /// The Simplified Chinese character set defined in GB2312.
    Gb2312,
    /// The Chinese character set defined in GBK.
    Gbk,
    /// The Unicode character set defined in ISO IR 192 (UTF-8).
    IsoIr192,
}

impl Default for SpecificCharacterSet {
    fn default() -> Self {
        SpecificCharacterSet::Default
    }
}

impl SpecificCharacterSet {
    /// Resolve a Specific Character Set term into a character set.
    ///
    /// An unrecognized term resolves to UTF-8.
    /// `None` is returned only for the terms which the engine
    /// deliberately does not support
    /// (`ISO 2022 IR 149` and `ISO 2022 IR 58`).
    pub fn from_term(term: &str) -> Option<Self> {
        use self::SpecificCharacterSet::*;
        match term.trim() {
            "" | "ISO_IR 6" | "ISO 2022 IR 6" => Some(Default),
            "ISO_IR 100" => Some(IsoIr100),
            "ISO_IR 101" => Some(IsoIr101),
            "ISO_IR 109" => Some(IsoIr109),
            "ISO_IR 110" => Some(IsoIr110),
            "ISO_IR 144" => Some(IsoIr144),
            "ISO_IR 127" => Some(IsoIr127),
            "ISO_IR 126" => Some(IsoIr126),
            "ISO_IR 138" => Some(IsoIr138),
            "ISO_IR 148" => Some(IsoIr148),
            "ISO_IR 166" => Some(IsoIr166),
            "ISO_IR 13" => Some(IsoIr13),
            "ISO 2022 IR 87" => Some(Iso2022Ir87),
            "GB18030" => Some(Gb18030),
            "GB2312" => Some(Gb2312),
            "GBK" => Some(Gbk),
            "ISO_IR 192" => Some(IsoIr192),
            // unsupported multi-byte code extension sets
            "ISO 2022 IR 149" | "ISO 2022 IR 58" => None,
            _ => Some(IsoIr192),
        }
    }

    /// Resolve the character set named by a Specific Character Set
    /// element value.
    ///
    /// With code extensions (multiple values), the second term is the one
    /// used for decoding; the first term is reported as a warning.
    /// Unsupported terms resolve to `None` with a warning,
    /// in which case the character set in effect should be kept.
    pub fn from_terms(terms: &[String]) -> Option<Self> {
        let term = if terms.len() >= 2 {
            tracing::warn!(
                "Specific Character Set with code extensions (first term {:?}), using second term {:?}",
                terms[0],
                terms[1]
            );
            &terms[1]
        } else {
            terms.first()?
        };
        let charset = Self::from_term(term);
        if charset.is_none() {
            tracing::warn!("Unsupported character set term {:?}", term);
        }
        charset
    }

    /// The WHATWG encoding label for this character set.
    fn label(self) -> &'static str {
        use self::SpecificCharacterSet::*;
        match self {
            Default | IsoIr100 => "iso-8859-1",
            IsoIr101 => "iso-8859-2",
            IsoIr109 => "iso-8859-3",
            IsoIr110 => "iso-8859-4",
            IsoIr144 => "iso-8859-5",
            IsoIr127 => "iso-8859-6",
            IsoIr126 => "iso-8859-7",
            IsoIr138 => "iso-8859-8",
            IsoIr148 => "iso-8859-9",
            IsoIr166 => "iso-8859-11",
            IsoIr13 => "shift-jis",
            Iso2022Ir87 => "iso-2022-jp",
            Gb18030 => "gb18030",
            Gb2312 => "gb2312",
            Gbk => "chinese",
            IsoIr192 => "utf-8",
        }
    }

    /// Retrieve the respective text codec.
    pub fn codec(self) -> DynamicTextCodec {
        match self {
            SpecificCharacterSet::Default => Box::new(DefaultCharacterSetCodec),
            SpecificCharacterSet::IsoIr192 => Box::new(Utf8CharacterSetCodec),
            other => {
                let repr = encoding_from_whatwg_label(other.label()).unwrap_or(UTF_8);
                Box::new(LabeledCodec {
                    name: other.label(),
                    repr,
                })
            }
        }
    }
}

fn decode_text_trap(
    _decoder: &mut dyn RawDecoder,
    input: &[u8],
    output: &mut dyn StringWriter,
) -> bool {
    let c = input[0];
    let o0 = c & 7;
    let o1 = (c & 56) >> 3;
    let o2 = (c & 192) >> 6;
    output.write_char('\\');
    output.write_char((o2 + b'0') as char);
    output.write_char((o1 + b'0') as char);
    output.write_char((o0 + b'0') as char);
    true
}

/// Data type representing the default character set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Copy)]
pub struct DefaultCharacterSetCodec;

impl TextCodec for DefaultCharacterSetCodec {
    fn name(&self) -> &'static str {
        "ISO_IR 6"
    }

    fn decode(&self, text: &[u8]) -> Result<String> {
        ISO_8859_1
            .decode(text, DecoderTrap::Call(decode_text_trap))
            .map_err(|e| {
                DecodeTextSnafu {
                    codec: self.name(),
                    message: e.to_string(),
                }
                .build()
            })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        ISO_8859_1.encode(text, EncoderTrap::Strict).map_err(|e| {
            EncodeTextSnafu {
                codec: self.name(),
                message: e.to_string(),
            }
            .build()
        })
    }
}

/// Data type representing the UTF-8 character set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Copy)]
pub struct Utf8CharacterSetCodec;

impl TextCodec for Utf8CharacterSetCodec {
    fn name(&self) -> &'static str {
        "ISO_IR 192"
    }

    fn decode(&self, text: &[u8]) -> Result<String> {
        UTF_8
            .decode(text, DecoderTrap::Call(decode_text_trap))
            .map_err(|e| {
                DecodeTextSnafu {
                    codec: self.name(),
                    message: e.to_string(),
                }
                .build()
            })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        UTF_8.encode(text, EncoderTrap::Strict).map_err(|e| {
            EncodeTextSnafu {
                codec: self.name(),
                message: e.to_string(),
            }
            .build()
        })
    }
}

/// A text codec backed by a codec implementation
/// resolved at run time from a WHATWG encoding label.
pub struct LabeledCodec {
    name: &'static str,
    repr: EncodingRef,
}

impl Debug for LabeledCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("LabeledCodec").field("name", &self.name).finish()
    }
}

impl TextCodec for LabeledCodec {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, text: &[u8]) -> Result<String> {
        self.repr
            .decode(text, DecoderTrap::Call(decode_text_trap))
            .map_err(|e| {
                DecodeTextSnafu {
                    codec: self.name,
                    message: e.to_string(),
                }
                .build()
            })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        self.repr.encode(text, EncoderTrap::Strict).map_err(|e| {
            EncodeTextSnafu {
                codec: self.name,
                message: e.to_string(),
            }
            .build()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_resolution() {
        assert_eq!(
            SpecificCharacterSet::from_term("ISO_IR 100"),
            Some(SpecificCharacterSet::IsoIr100)
        );
        assert_eq!(
            SpecificCharacterSet::from_term("ISO_IR 192 "),
            Some(SpecificCharacterSet::IsoIr192)
        );
        assert_eq!(
            SpecificCharacterSet::from_term(""),
            Some(SpecificCharacterSet::Default)
        );
        assert_eq!(
            SpecificCharacterSet::from_term("GB18030"),
            Some(SpecificCharacterSet::Gb18030)
        );
        // deliberately unsupported
        assert_eq!(SpecificCharacterSet::from_term("ISO 2022 IR 149"), None);
        assert_eq!(SpecificCharacterSet::from_term("ISO 2022 IR 58"), None);
        // unrecognized terms default to UTF-8
        assert_eq!(
            SpecificCharacterSet::from_term("ISO_IR 999"),
            Some(SpecificCharacterSet::IsoIr192)
        );
    }

    #[test]
    fn default_codec_decodes_latin1() {
        let codec = DefaultCharacterSetCodec;
        assert_eq!(codec.decode(b"Simpson^Homer J.").unwrap(), "Simpson^Homer J.");
        // 0xE9 is é in ISO-8859-1
        assert_eq!(codec.decode(&[0x63, 0x61, 0x66, 0xE9]).unwrap(), "caf\u{e9}");
        assert_eq!(codec.encode("caf\u{e9}").unwrap(), vec![0x63, 0x61, 0x66, 0xE9]);
    }

    #[test]
    fn labeled_codec_round_trip() {
        let codec = SpecificCharacterSet::IsoIr144.codec();
        // Cyrillic "Иван" in ISO-8859-5
        let bytes = [0xB8, 0xD2, 0xD0, 0xDD];
        let text = codec.decode(&bytes).unwrap();
        assert_eq!(text, "\u{418}\u{432}\u{430}\u{43d}");
        assert_eq!(codec.encode(&text).unwrap(), bytes);
    }
}
