//! Whole-file reading and writing of DICOM data sets:
//! preamble, magic code, File Meta group, and the data set proper.

use crate::mem::{AccessError, BuildError, DataSet, InMemElement};
use crate::meta::{self, DICM_MAGIC_CODE, MAGIC_OFFSET, META_OFFSET};
use crate::rules::RuleSet;
use dicoview_core::value::PrimitiveValue;
use dicoview_core::{tags, Header, Tag, VR};
use dicoview_encoding::text::SpecificCharacterSet;
use dicoview_encoding::transfer_syntax::TransferSyntax;
use dicoview_parser::dataset::read::DataSetReader;
use dicoview_parser::dataset::write::{self, DataSetWriter};
use snafu::{Backtrace, ResultExt, Snafu};

/// An error while parsing or writing a DICOM file.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The buffer does not hold a DICOM file.
    #[snafu(display("Not a DICOM file: {}", reason))]
    NotDicom {
        /// what was missing
        reason: &'static str,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// The File Meta group could not be interpreted.
    #[snafu(display("Could not read the File Meta group"))]
    ParseMeta {
        /// the underlying meta group error
        #[snafu(backtrace)]
        source: meta::Error,
    },
    /// The transfer syntax is missing from the registry
    /// or not supported by this engine.
    #[snafu(display("Could not resolve the transfer syntax"))]
    ResolveTransferSyntax {
        /// the underlying resolution error
        #[snafu(backtrace)]
        source: dicoview_encoding::transfer_syntax::Error,
    },
    /// The data set could not be parsed into elements.
    #[snafu(display("Could not build the data set"))]
    BuildObject {
        /// the underlying build error
        #[snafu(backtrace)]
        source: BuildError,
    },
    /// The data set could not be serialized.
    #[snafu(display("Could not write the data set"))]
    WriteDataSet {
        /// the underlying writing error
        #[snafu(backtrace)]
        source: write::Error,
    },
}

/// Result alias for file-level operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The set of options recognized by the file parser.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParseOptions {
    /// The character set to assume before any
    /// Specific Character Set element is found.
    pub default_character_set: Option<SpecificCharacterSet>,
}

/// A DICOM file fully loaded in memory:
/// the preamble, the parsed element map (File Meta group included),
/// and the resolved transfer syntax of the data set.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDataSet {
    /// the 128-byte preamble, preserved verbatim on write
    preamble: Vec<u8>,
    /// all data elements, File Meta group included
    elements: DataSet,
    /// the resolved transfer syntax of the data set
    ts: &'static TransferSyntax,
}

impl FileDataSet {
    /// Parse a DICOM file from the given byte buffer.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with_options(data, ParseOptions::default())
    }

    /// Parse a DICOM file from the given byte buffer,
    /// with the given parser options.
    pub fn parse_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        if data.len() < META_OFFSET
            || data[MAGIC_OFFSET..META_OFFSET] != DICM_MAGIC_CODE
        {
            return NotDicomSnafu {
                reason: "magic code DICM not found",
            }
            .fail();
        }

        let (meta, meta_end) = meta::read_meta_group(data).context(ParseMetaSnafu)?;

        let ts_uid = meta
            .element(tags::TRANSFER_SYNTAX_UID)
            .ok()
            .and_then(|e| e.value().to_str().ok())
            .ok_or_else(|| {
                NotDicomSnafu {
                    reason: "missing Transfer Syntax UID",
                }
                .build()
            })?;
        let ts = TransferSyntax::from_uid(&ts_uid).context(ResolveTransferSyntaxSnafu)?;

        let charset = options.default_character_set.unwrap_or_default();
        let mut reader = DataSetReader::new(data, ts, charset, meta_end, data.len());
        let body = DataSet::build_object(&mut reader).context(BuildObjectSnafu)?;
        if reader.position() != data.len() {
            tracing::warn!(
                "Input buffer not fully consumed: stopped at offset {} of {}",
                reader.position(),
                data.len()
            );
        }

        let mut elements = meta;
        for elem in body {
            elements.put(elem);
        }

        Ok(FileDataSet {
            preamble: data[..MAGIC_OFFSET].to_vec(),
            elements,
            ts,
        })
    }

    /// Create a file data set around existing elements,
    /// to be encoded with the given transfer syntax.
    ///
    /// The preamble is zeroed and a Transfer Syntax UID element is
    /// inserted in the File Meta group.
    pub fn from_dataset(mut elements: DataSet, ts: &'static TransferSyntax) -> Self {
        let mut uid = ts.uid.to_string();
        if uid.len() % 2 != 0 {
            uid.push('\0');
        }
        elements.put(InMemElement::new(
            tags::TRANSFER_SYNTAX_UID,
            VR::UI,
            PrimitiveValue::Strs([uid].as_ref().into()),
        ));
        FileDataSet {
            preamble: vec![0u8; MAGIC_OFFSET],
            elements,
            ts,
        }
    }

    /// The resolved transfer syntax of the data set.
    pub fn transfer_syntax(&self) -> &'static TransferSyntax {
        self.ts
    }

    /// The file preamble.
    pub fn preamble(&self) -> &[u8] {
        &self.preamble
    }

    /// All data elements, File Meta group included.
    pub fn elements(&self) -> &DataSet {
        &self.elements
    }

    /// Mutable access to the data elements.
    pub fn elements_mut(&mut self) -> &mut DataSet {
        &mut self.elements
    }

    /// Discard the file-level wrapping, keeping the elements.
    pub fn into_elements(self) -> DataSet {
        self.elements
    }

    /// Retrieve a particular DICOM element by its tag.
    pub fn element(&self, tag: Tag) -> Result<&InMemElement, AccessError> {
        self.elements.element(tag)
    }

    /// Retrieve a particular DICOM element by its attribute keyword.
    pub fn element_by_name(&self, name: &str) -> Result<&InMemElement, AccessError> {
        self.elements.element_by_name(name)
    }

    /// Serialize the file back into bytes:
    /// the preserved preamble, the magic code,
    /// the File Meta group in Explicit VR Little Endian
    /// (group length and implementation identification synthesized),
    /// and the data set in its transfer syntax.
    pub fn write(&self) -> Result<Vec<u8>> {
        self.write_elements(&self.elements)
    }

    /// Serialize the file as [`write`](Self::write) does,
    /// with the given rules applied to the elements first.
    pub fn write_with_rules(&self, rules: &RuleSet) -> Result<Vec<u8>> {
        let transformed = rules.apply(&self.elements);
        self.write_elements(&transformed)
    }

    fn write_elements(&self, elements: &DataSet) -> Result<Vec<u8>> {
        // partition into File Meta group and data set proper
        let mut meta = DataSet::create_empty();
        let mut body = DataSet::create_empty();
        for elem in elements.iter() {
            if elem.tag().group() == 0x0002 {
                meta.put(elem.clone());
            } else {
                body.put(elem.clone());
            }
        }

        // the File Meta group must name the data set's transfer syntax
        if !meta.contains(tags::TRANSFER_SYNTAX_UID) {
            let mut uid = self.ts.uid.to_string();
            if uid.len() % 2 != 0 {
                uid.push('\0');
            }
            meta.put(InMemElement::new(
                tags::TRANSFER_SYNTAX_UID,
                VR::UI,
                PrimitiveValue::Strs([uid].as_ref().into()),
            ));
        }

        let meta_bytes = meta::write_meta_group(&meta).context(WriteDataSetSnafu)?;

        let mut body_writer = DataSetWriter::new(self.ts, SpecificCharacterSet::default());
        body.write_to(&mut body_writer).context(WriteDataSetSnafu)?;
        let body_bytes = body_writer.into_inner();

        let mut out =
            Vec::with_capacity(META_OFFSET + 4 + meta_bytes.len() + body_bytes.len());
        out.extend_from_slice(&self.preamble[..self.preamble.len().min(MAGIC_OFFSET)]);
        out.resize(MAGIC_OFFSET, 0);
        out.extend_from_slice(&DICM_MAGIC_CODE);
        out.extend_from_slice(&meta_bytes);
        out.extend_from_slice(&body_bytes);
        Ok(out)
    }
}
