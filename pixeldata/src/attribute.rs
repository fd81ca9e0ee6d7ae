//! Utility module for fetching key attributes from a DICOM data set.

use dicoview_core::tags;
use dicoview_core::value::{CastValueError, ConvertValueError};
use dicoview_object::DataSet;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};

/// An error fetching a typed attribute value out of a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum GetAttributeError {
    /// A required attribute is not in the data set.
    #[snafu(display("Missing required attribute `{}`", name))]
    MissingRequiredField {
        /// the attribute keyword
        name: &'static str,
        /// backtrace of the failed fetch
        backtrace: Backtrace,
    },

    /// The attribute value is of an incompatible variant.
    #[snafu(display("Could not get attribute `{}`", name))]
    CastValue {
        /// the attribute keyword
        name: &'static str,
        /// the underlying cast error
        source: CastValueError,
    },

    /// The attribute value failed to convert to the requested type.
    #[snafu(display("Could not convert attribute `{}`", name))]
    ConvertValue {
        /// the attribute keyword
        name: &'static str,
        /// the underlying conversion error
        source: ConvertValueError,
    },
}

/// Result alias for attribute retrieval.
pub type Result<T, E = GetAttributeError> = std::result::Result<T, E>;

fn required_u16(obj: &DataSet, tag: dicoview_core::Tag, name: &'static str) -> Result<u16> {
    obj.get(tag)
        .context(MissingRequiredFieldSnafu { name })?
        .value()
        .primitive()
        .context(MissingRequiredFieldSnafu { name })?
        .to_int::<u16>()
        .context(ConvertValueSnafu { name })
}

fn optional_u16(obj: &DataSet, tag: dicoview_core::Tag, name: &'static str) -> Result<Option<u16>> {
    match obj.get(tag).and_then(|e| e.value().primitive()) {
        None => Ok(None),
        Some(v) => v
            .to_int::<u16>()
            .map(Some)
            .context(ConvertValueSnafu { name }),
    }
}

fn optional_f64(obj: &DataSet, tag: dicoview_core::Tag, name: &'static str) -> Result<Option<f64>> {
    match obj.get(tag).and_then(|e| e.value().primitive()) {
        None => Ok(None),
        Some(v) if v.multiplicity() == 0 => Ok(None),
        Some(v) => v.to_float64().map(Some).context(ConvertValueSnafu { name }),
    }
}

fn optional_string(obj: &DataSet, tag: dicoview_core::Tag) -> Option<String> {
    obj.get(tag)
        .and_then(|e| e.value().primitive())
        .map(|v| v.to_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Get the Rows from the data set.
pub fn rows(obj: &DataSet) -> Result<u16> {
    required_u16(obj, tags::ROWS, "Rows")
}

/// Get the Columns from the data set.
pub fn cols(obj: &DataSet) -> Result<u16> {
    required_u16(obj, tags::COLUMNS, "Columns")
}

/// Get the SamplesPerPixel from the data set, returning 1 by default.
pub fn samples_per_pixel(obj: &DataSet) -> Result<u16> {
    Ok(optional_u16(obj, tags::SAMPLES_PER_PIXEL, "SamplesPerPixel")?.unwrap_or(1))
}

/// Get the BitsAllocated from the data set, returning 16 by default.
pub fn bits_allocated(obj: &DataSet) -> Result<u16> {
    Ok(optional_u16(obj, tags::BITS_ALLOCATED, "BitsAllocated")?.unwrap_or(16))
}

/// Get the BitsStored from the data set, if present.
pub fn bits_stored(obj: &DataSet) -> Result<Option<u16>> {
    optional_u16(obj, tags::BITS_STORED, "BitsStored")
}

/// Get the PixelRepresentation from the data set, returning 0 by default.
pub fn pixel_representation(obj: &DataSet) -> Result<u16> {
    Ok(optional_u16(obj, tags::PIXEL_REPRESENTATION, "PixelRepresentation")?.unwrap_or(0))
}

/// Get the PlanarConfiguration from the data set, returning 0 by default.
pub fn planar_configuration(obj: &DataSet) -> Result<u16> {
    Ok(optional_u16(obj, tags::PLANAR_CONFIGURATION, "PlanarConfiguration")?.unwrap_or(0))
}

/// Get the NumberOfFrames from the data set, returning 1 by default.
pub fn number_of_frames(obj: &DataSet) -> Result<u32> {
    match obj.get(tags::NUMBER_OF_FRAMES).and_then(|e| e.value().primitive()) {
        None => Ok(1),
        Some(v) => v
            .to_int::<u32>()
            .context(ConvertValueSnafu {
                name: "NumberOfFrames",
            })
            .map(|n| n.max(1)),
    }
}

/// Get the PhotometricInterpretation from the data set,
/// returning `MONOCHROME2` by default.
pub fn photometric_interpretation(obj: &DataSet) -> String {
    optional_string(obj, tags::PHOTOMETRIC_INTERPRETATION)
        .unwrap_or_else(|| "MONOCHROME2".to_string())
}

/// Get the RescaleSlope from the data set, returning 1 by default.
pub fn rescale_slope(obj: &DataSet) -> Result<f64> {
    Ok(optional_f64(obj, tags::RESCALE_SLOPE, "RescaleSlope")?.unwrap_or(1.0))
}

/// Get the RescaleIntercept from the data set, returning 0 by default.
pub fn rescale_intercept(obj: &DataSet) -> Result<f64> {
    Ok(optional_f64(obj, tags::RESCALE_INTERCEPT, "RescaleIntercept")?.unwrap_or(0.0))
}

/// Get the pixel spacing as a `(column, row)` pair in millimeters.
///
/// PixelSpacing carries its values in `row\column` order;
/// ImagerPixelSpacing is used as a fallback.
/// Missing spacing information defaults to `(1, 1)`.
pub fn pixel_spacing(obj: &DataSet) -> Result<(f64, f64)> {
    for (tag, name) in [
        (tags::PIXEL_SPACING, "PixelSpacing"),
        (tags::IMAGER_PIXEL_SPACING, "ImagerPixelSpacing"),
    ] {
        if let Some(v) = obj.get(tag).and_then(|e| e.value().primitive()) {
            let values = v.to_multi_float64().context(ConvertValueSnafu { name })?;
            if values.len() >= 2 {
                // first value is the row spacing, second the column spacing
                return Ok((values[1], values[0]));
            }
        }
    }
    Ok((1.0, 1.0))
}

/// Get the ImagePositionPatient as a 3D point, defaulting to the origin.
pub fn image_position(obj: &DataSet) -> Result<[f64; 3]> {
    match obj.get(tags::IMAGE_POSITION_PATIENT).and_then(|e| e.value().primitive()) {
        None => Ok([0.0, 0.0, 0.0]),
        Some(v) => {
            let values = v.to_multi_float64().context(ConvertValueSnafu {
                name: "ImagePositionPatient",
            })?;
            if values.len() >= 3 {
                Ok([values[0], values[1], values[2]])
            } else {
                Ok([0.0, 0.0, 0.0])
            }
        }
    }
}

/// Get the ImageOrientationPatient as the 6 direction cosines,
/// if present.
pub fn image_orientation(obj: &DataSet) -> Result<Option<[f64; 6]>> {
    match obj.get(tags::IMAGE_ORIENTATION_PATIENT).and_then(|e| e.value().primitive()) {
        None => Ok(None),
        Some(v) => {
            let values = v.to_multi_float64().context(ConvertValueSnafu {
                name: "ImageOrientationPatient",
            })?;
            if values.len() >= 6 {
                Ok(Some([
                    values[0], values[1], values[2], values[3], values[4], values[5],
                ]))
            } else {
                Ok(None)
            }
        }
    }
}

/// Get the Modality from the data set, if present.
pub fn modality(obj: &DataSet) -> Option<String> {
    optional_string(obj, tags::MODALITY)
}

/// Get the StudyInstanceUID from the data set, if present.
pub fn study_instance_uid(obj: &DataSet) -> Option<String> {
    optional_string(obj, tags::STUDY_INSTANCE_UID)
}

/// Get the SeriesInstanceUID from the data set, if present.
pub fn series_instance_uid(obj: &DataSet) -> Option<String> {
    optional_string(obj, tags::SERIES_INSTANCE_UID)
}
