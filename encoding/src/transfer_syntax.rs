//! The registry of transfer syntaxes supported by the engine.
//!
//! A [`TransferSyntax`] describes how a data set is encoded at the byte
//! level: the byte order, whether value representations are explicit on
//! the wire, and which pixel data compression algorithm applies.

use byteordered::Endianness;
use snafu::{Backtrace, Snafu};

/// An error raised when resolving a transfer syntax UID.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The transfer syntax is known but cannot be decoded by this engine,
    /// or the UID is not a registered transfer syntax at all.
    #[snafu(display("Unsupported transfer syntax {} ({})", uid, name))]
    UnsupportedSyntax {
        /// the transfer syntax UID found in the file meta group
        uid: String,
        /// the human readable name of the transfer syntax
        name: &'static str,
        /// backtrace of the resolution failure
        backtrace: Backtrace,
    },
}

/// Result alias for transfer syntax resolution.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The pixel data compression algorithm designated by a transfer syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelAlgorithm {
    /// Native (uncompressed) pixel data.
    None,
    /// JPEG baseline (processes 1, 2 and 4).
    JpegBaseline,
    /// JPEG lossless (processes 14).
    JpegLossless,
    /// JPEG 2000, lossless or lossy.
    Jpeg2000,
}

/// A descriptor of a supported DICOM transfer syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferSyntax {
    /// The UID of the transfer syntax.
    pub uid: &'static str,
    /// The published name of the transfer syntax.
    pub name: &'static str,
    /// The byte order of the data set.
    pub endianness: Endianness,
    /// Whether value representations are explicit on the wire.
    pub explicit_vr: bool,
    /// The pixel data compression algorithm.
    pub algorithm: PixelAlgorithm,
}

/// Implicit VR Little Endian: the default transfer syntax.
pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
    uid: "1.2.840.10008.1.2",
    name: "Implicit VR Little Endian",
    endianness: Endianness::Little,
    explicit_vr: false,
    algorithm: PixelAlgorithm::None,
};

/// Explicit VR Little Endian.
pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
    uid: "1.2.840.10008.1.2.1",
    name: "Explicit VR Little Endian",
    endianness: Endianness::Little,
    explicit_vr: true,
    algorithm: PixelAlgorithm::None,
};

/// Explicit VR Big Endian (retired, still found in the wild).
pub const EXPLICIT_VR_BIG_ENDIAN: TransferSyntax = TransferSyntax {
    uid: "1.2.840.10008.1.2.2",
    name: "Explicit VR Big Endian",
    endianness: Endianness::Big,
    explicit_vr: true,
    algorithm: PixelAlgorithm::None,
};

static SUPPORTED: &[TransferSyntax] = &[
    IMPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_BIG_ENDIAN,
    TransferSyntax {
        uid: "1.2.840.10008.1.2.4.50",
        name: "JPEG Baseline (Process 1)",
        endianness: Endianness::Little,
        explicit_vr: true,
        algorithm: PixelAlgorithm::JpegBaseline,
    },
    TransferSyntax {
        uid: "1.2.840.10008.1.2.4.51",
        name: "JPEG Extended (Process 2 & 4)",
        endianness: Endianness::Little,
        explicit_vr: true,
        algorithm: PixelAlgorithm::JpegBaseline,
    },
    TransferSyntax {
        uid: "1.2.840.10008.1.2.4.57",
        name: "JPEG Lossless, Non-Hierarchical (Process 14)",
        endianness: Endianness::Little,
        explicit_vr: true,
        algorithm: PixelAlgorithm::JpegLossless,
    },
    TransferSyntax {
        uid: "1.2.840.10008.1.2.4.70",
        name: "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
        endianness: Endianness::Little,
        explicit_vr: true,
        algorithm: PixelAlgorithm::JpegLossless,
    },
    TransferSyntax {
        uid: "1.2.840.10008.1.2.4.90",
        name: "JPEG 2000 Image Compression (Lossless Only)",
        endianness: Endianness::Little,
        explicit_vr: true,
        algorithm: PixelAlgorithm::Jpeg2000,
    },
    TransferSyntax {
        uid: "1.2.840.10008.1.2.4.91",
        name: "JPEG 2000 Image Compression",
        endianness: Endianness::Little,
        explicit_vr: true,
        algorithm: PixelAlgorithm::Jpeg2000,
    },
];

/// Transfer syntaxes which are recognized but not decodable by this engine.
/// Kept around so that error messages carry the published name.
static KNOWN_UNSUPPORTED: &[(&str, &str)] = &[
    ("1.2.840.10008.1.2.1.99", "Deflated Explicit VR Little Endian"),
    ("1.2.840.10008.1.2.4.80", "JPEG-LS Lossless Image Compression"),
    ("1.2.840.10008.1.2.4.81", "JPEG-LS Lossy (Near-Lossless) Image Compression"),
    ("1.2.840.10008.1.2.4.92", "JPEG 2000 Part 2 Multi-component (Lossless Only)"),
    ("1.2.840.10008.1.2.4.93", "JPEG 2000 Part 2 Multi-component"),
    ("1.2.840.10008.1.2.4.94", "JPIP Referenced"),
    ("1.2.840.10008.1.2.4.95", "JPIP Referenced Deflate"),
    ("1.2.840.10008.1.2.4.100", "MPEG2 Main Profile / Main Level"),
    ("1.2.840.10008.1.2.4.101", "MPEG2 Main Profile / High Level"),
    ("1.2.840.10008.1.2.4.102", "MPEG-4 AVC/H.264 High Profile"),
    ("1.2.840.10008.1.2.4.103", "MPEG-4 AVC/H.264 BD-compatible High Profile"),
    ("1.2.840.10008.1.2.5", "RLE Lossless"),
];

impl TransferSyntax {
    /// Resolve the transfer syntax carried in a Transfer Syntax UID value.
    ///
    /// Trailing padding characters in the UID are ignored.
    /// UIDs which are recognized but not decodable
    /// (including any retired JPEG process in the `1.2.840.10008.1.2.4.5x`
    /// range outside {50, 51, 57} and the whole `.6x` range)
    /// resolve to an [`UnsupportedSyntax`](Error::UnsupportedSyntax) error
    /// carrying the published name.
    pub fn from_uid(uid: &str) -> Result<&'static TransferSyntax> {
        let uid = uid.trim_end_matches(['\0', ' ']);
        if let Some(ts) = SUPPORTED.iter().find(|ts| ts.uid == uid) {
            return Ok(ts);
        }
        let name = KNOWN_UNSUPPORTED
            .iter()
            .find(|(u, _)| *u == uid)
            .map(|(_, name)| *name)
            .unwrap_or_else(|| {
                if uid.starts_with("1.2.840.10008.1.2.4.5") {
                    "Retired JPEG Lossy"
                } else if uid.starts_with("1.2.840.10008.1.2.4.6") {
                    "Retired JPEG Lossless"
                } else {
                    "Unknown"
                }
            });
        UnsupportedSyntaxSnafu {
            uid: uid.to_string(),
            name,
        }
        .fail()
    }

    /// Whether the data set uses implicit VR encoding.
    #[inline]
    pub fn implicit_vr(&self) -> bool {
        !self.explicit_vr
    }

    /// Whether the pixel data is compressed under this transfer syntax.
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.algorithm != PixelAlgorithm::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_supported_syntaxes() {
        let ts = TransferSyntax::from_uid("1.2.840.10008.1.2").unwrap();
        assert!(ts.implicit_vr());
        assert_eq!(ts.endianness, Endianness::Little);

        let ts = TransferSyntax::from_uid("1.2.840.10008.1.2.2\0").unwrap();
        assert!(ts.explicit_vr);
        assert_eq!(ts.endianness, Endianness::Big);

        let ts = TransferSyntax::from_uid("1.2.840.10008.1.2.4.50").unwrap();
        assert_eq!(ts.algorithm, PixelAlgorithm::JpegBaseline);
        assert!(ts.is_compressed());

        let ts = TransferSyntax::from_uid("1.2.840.10008.1.2.4.91").unwrap();
        assert_eq!(ts.algorithm, PixelAlgorithm::Jpeg2000);
    }

    #[test]
    fn reject_unsupported_syntaxes() {
        let err = TransferSyntax::from_uid("1.2.840.10008.1.2.5").unwrap_err();
        assert!(err.to_string().contains("RLE Lossless"));

        // retired JPEG processes resolve by range
        let err = TransferSyntax::from_uid("1.2.840.10008.1.2.4.55").unwrap_err();
        assert!(err.to_string().contains("Retired JPEG"));
        let err = TransferSyntax::from_uid("1.2.840.10008.1.2.4.65").unwrap_err();
        assert!(err.to_string().contains("Retired JPEG"));

        assert!(TransferSyntax::from_uid("1.2.3.4").is_err());
    }
}
