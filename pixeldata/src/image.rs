//! The image entity assembled from a parsed data set:
//! typed frame buffers, geometry, per-slice rescale information,
//! photometric interpretation and key acquisition metadata.

use crate::attribute;
use crate::geometry::{Geometry, Matrix33, Point3, Size, Spacing};
use dicoview_core::value::PrimitiveValue;
use dicoview_object::FileDataSet;
use snafu::{Backtrace, ResultExt, Snafu};

/// An error while constructing an image from a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ImageBuildError {
    /// The data set does not describe a usable image.
    #[snafu(display("Malformed image: {}", source))]
    MalformedImage {
        /// the underlying attribute error
        #[snafu(backtrace)]
        source: attribute::GetAttributeError,
    },
}

/// An error from an [`Image::append_slice`] or [`Image::append_frame`]
/// precondition violation.
#[derive(Debug, Snafu)]
#[snafu(display("Slice mismatch: {}", reason))]
pub struct SliceMismatch {
    /// what did not match
    pub reason: String,
    /// backtrace of the failure
    pub backtrace: Backtrace,
}

/// A typed buffer of decoded sample values for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBuffer {
    /// unsigned 8-bit samples
    U8(Vec<u8>),
    /// signed 8-bit samples
    I8(Vec<i8>),
    /// unsigned 16-bit samples
    U16(Vec<u16>),
    /// signed 16-bit samples
    I16(Vec<i16>),
    /// unsigned 32-bit samples
    U32(Vec<u32>),
    /// signed 32-bit samples
    I32(Vec<i32>),
}

impl FrameBuffer {
    /// The number of samples in the buffer.
    pub fn len(&self) -> usize {
        match self {
            FrameBuffer::U8(v) => v.len(),
            FrameBuffer::I8(v) => v.len(),
            FrameBuffer::U16(v) => v.len(),
            FrameBuffer::I16(v) => v.len(),
            FrameBuffer::U32(v) => v.len(),
            FrameBuffer::I32(v) => v.len(),
        }
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a sample value as a double-precision float.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            FrameBuffer::U8(v) => v.get(index).map(|x| f64::from(*x)),
            FrameBuffer::I8(v) => v.get(index).map(|x| f64::from(*x)),
            FrameBuffer::U16(v) => v.get(index).map(|x| f64::from(*x)),
            FrameBuffer::I16(v) => v.get(index).map(|x| f64::from(*x)),
            FrameBuffer::U32(v) => v.get(index).map(|x| f64::from(*x)),
            FrameBuffer::I32(v) => v.get(index).map(|x| f64::from(*x)),
        }
    }

    /// Whether two buffers hold the same sample type.
    pub fn same_type(&self, other: &FrameBuffer) -> bool {
        matches!(
            (self, other),
            (FrameBuffer::U8(_), FrameBuffer::U8(_))
                | (FrameBuffer::I8(_), FrameBuffer::I8(_))
                | (FrameBuffer::U16(_), FrameBuffer::U16(_))
                | (FrameBuffer::I16(_), FrameBuffer::I16(_))
                | (FrameBuffer::U32(_), FrameBuffer::U32(_))
                | (FrameBuffer::I32(_), FrameBuffer::I32(_))
        )
    }

    /// Splice the samples of `slice` into this buffer
    /// at the given sample offset.
    fn splice(&mut self, offset: usize, slice: &FrameBuffer) {
        match (self, slice) {
            (FrameBuffer::U8(a), FrameBuffer::U8(b)) => {
                a.splice(offset..offset, b.iter().copied());
            }
            (FrameBuffer::I8(a), FrameBuffer::I8(b)) => {
                a.splice(offset..offset, b.iter().copied());
            }
            (FrameBuffer::U16(a), FrameBuffer::U16(b)) => {
                a.splice(offset..offset, b.iter().copied());
            }
            (FrameBuffer::I16(a), FrameBuffer::I16(b)) => {
                a.splice(offset..offset, b.iter().copied());
            }
            (FrameBuffer::U32(a), FrameBuffer::U32(b)) => {
                a.splice(offset..offset, b.iter().copied());
            }
            (FrameBuffer::I32(a), FrameBuffer::I32(b)) => {
                a.splice(offset..offset, b.iter().copied());
            }
            _ => unreachable!("buffer types checked beforehand"),
        }
    }
}

/// Rescale slope and intercept: the linear transform from stored sample
/// values to modality values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rsi {
    /// the rescale slope
    pub slope: f64,
    /// the rescale intercept
    pub intercept: f64,
}

impl Default for Rsi {
    fn default() -> Self {
        Rsi {
            slope: 1.0,
            intercept: 0.0,
        }
    }
}

impl Rsi {
    /// Create a new rescale pair.
    pub fn new(slope: f64, intercept: f64) -> Self {
        Rsi { slope, intercept }
    }

    /// Whether this transform is the identity.
    pub fn is_identity(&self) -> bool {
        self.slope == 1.0 && self.intercept == 0.0
    }

    /// Apply the transform to a stored value.
    pub fn apply(&self, value: f64) -> f64 {
        value * self.slope + self.intercept
    }
}

/// Key metadata carried along with an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMeta {
    /// the Modality value
    pub modality: Option<String>,
    /// the Study Instance UID
    pub study_instance_uid: Option<String>,
    /// the Series Instance UID
    pub series_instance_uid: Option<String>,
    /// the Bits Stored value
    pub bits_stored: Option<u16>,
    /// whether the stored samples are signed (Pixel Representation = 1)
    pub is_signed: bool,
}

/// A multi-frame image with geometry and rescale metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    geometry: Geometry,
    /// one buffer per frame; each buffer spans all slices
    frames: Vec<FrameBuffer>,
    /// one rescale transform per slice
    rsi_per_slice: Vec<Rsi>,
    photometric_interpretation: String,
    planar_configuration: u16,
    number_of_components: u16,
    meta: ImageMeta,
}

impl Image {
    /// Create an image from its parts.
    /// This is a trivial constructor: consistency between the geometry
    /// and the buffers is the caller's business.
    pub fn new(
        geometry: Geometry,
        frames: Vec<FrameBuffer>,
        rsi_per_slice: Vec<Rsi>,
        photometric_interpretation: String,
        planar_configuration: u16,
        number_of_components: u16,
        meta: ImageMeta,
    ) -> Self {
        Image {
            geometry,
            frames,
            rsi_per_slice,
            photometric_interpretation,
            planar_configuration,
            number_of_components,
            meta,
        }
    }

    /// The spatial description of the image volume.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The frame buffers.
    pub fn frames(&self) -> &[FrameBuffer] {
        &self.frames
    }

    /// The number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The photometric interpretation of the samples.
    pub fn photometric_interpretation(&self) -> &str {
        &self.photometric_interpretation
    }

    /// The planar configuration: 0 for interleaved samples, 1 for planar.
    pub fn planar_configuration(&self) -> u16 {
        self.planar_configuration
    }

    /// The number of sample components per pixel.
    pub fn number_of_components(&self) -> u16 {
        self.number_of_components
    }

    /// The image metadata.
    pub fn meta(&self) -> &ImageMeta {
        &self.meta
    }

    /// The rescale transform of the given slice.
    pub fn rsi(&self, slice: usize) -> Rsi {
        self.rsi_per_slice.get(slice).copied().unwrap_or_default()
    }

    /// Whether every slice carries the identity rescale transform.
    pub fn is_identity_rsi(&self) -> bool {
        self.rsi_per_slice.iter().all(Rsi::is_identity)
    }

    /// The number of samples in one slice of one frame.
    fn slice_len(&self) -> usize {
        self.geometry.size().plane_len() * self.number_of_components as usize
    }

    /// Fetch the stored sample value at the given column, row, slice and
    /// frame. For multi-component interleaved data this addresses the
    /// first component of the pixel.
    pub fn value_at(&self, i: u32, j: u32, k: usize, frame: usize) -> Option<f64> {
        let size = self.geometry.size();
        if i >= size.columns || j >= size.rows {
            return None;
        }
        let index = k * self.slice_len()
            + (j as usize * size.columns as usize + i as usize)
                * self.number_of_components as usize;
        self.frames.get(frame)?.get(index)
    }

    /// Fetch the rescaled value at the given column, row, slice and frame:
    /// the stored value pushed through the slice's rescale transform.
    pub fn rescaled_value_at(&self, i: u32, j: u32, k: usize, frame: usize) -> Option<f64> {
        self.value_at(i, j, k, frame)
            .map(|v| self.rsi(k).apply(v))
    }

    /// Append a frame buffer to the image.
    pub fn append_frame(&mut self, frame: FrameBuffer) -> Result<(), SliceMismatch> {
        if let Some(first) = self.frames.first() {
            if !first.same_type(&frame) {
                return SliceMismatchSnafu {
                    reason: "frame buffer type differs".to_string(),
                }
                .fail();
            }
            if first.len() != frame.len() {
                return SliceMismatchSnafu {
                    reason: format!(
                        "frame buffer length {} differs from {}",
                        frame.len(),
                        first.len()
                    ),
                }
                .fail();
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Merge a single-slice image into this one,
    /// inserting its data at the position determined by the geometry's
    /// slice ordering rule.
    ///
    /// Rows, columns, photometric interpretation and metadata must match.
    /// The frame buffers, the origin list and the rescale list are all
    /// spliced at the same index.
    pub fn append_slice(&mut self, other: Image) -> Result<(), SliceMismatch> {
        if other.geometry.size() != self.geometry.size() {
            return SliceMismatchSnafu {
                reason: format!(
                    "size {}x{} differs from {}x{}",
                    other.geometry.size().columns,
                    other.geometry.size().rows,
                    self.geometry.size().columns,
                    self.geometry.size().rows
                ),
            }
            .fail();
        }
        if other.photometric_interpretation != self.photometric_interpretation {
            return SliceMismatchSnafu {
                reason: format!(
                    "photometric interpretation {} differs from {}",
                    other.photometric_interpretation, self.photometric_interpretation
                ),
            }
            .fail();
        }
        if other.meta != self.meta {
            return SliceMismatchSnafu {
                reason: "image metadata differs".to_string(),
            }
            .fail();
        }
        if other.frames.len() != self.frames.len() {
            return SliceMismatchSnafu {
                reason: format!(
                    "frame count {} differs from {}",
                    other.frames.len(),
                    self.frames.len()
                ),
            }
            .fail();
        }
        if let (Some(a), Some(b)) = (self.frames.first(), other.frames.first()) {
            if !a.same_type(b) {
                return SliceMismatchSnafu {
                    reason: "frame buffer type differs".to_string(),
                }
                .fail();
            }
        }

        let origin = other.geometry.origin();
        let index = self.geometry.slice_index(origin);
        let offset = index * self.slice_len();
        for (frame, slice) in self.frames.iter_mut().zip(other.frames.iter()) {
            frame.splice(offset, slice);
        }
        self.geometry.insert_origin(index, origin);
        self.rsi_per_slice.insert(index, other.rsi(0));
        Ok(())
    }
}

/// Factory for building [`Image`]s out of parsed data sets.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFactory;

impl ImageFactory {
    /// Assemble an image from the parsed file and its frame buffers.
    ///
    /// The frame buffers come from the pixel pipeline:
    /// sliced out of native pixel data, or produced by a frame decoder
    /// for encapsulated pixel data. With a compressed transfer syntax,
    /// any photometric interpretation other than MONOCHROME1/2 becomes
    /// RGB, which is what the decoders emit.
    pub fn build(
        &self,
        file: &FileDataSet,
        frames: Vec<FrameBuffer>,
    ) -> Result<Image, ImageBuildError> {
        let elements = file.elements();

        let rows = attribute::rows(elements).context(MalformedImageSnafu)?;
        let cols = attribute::cols(elements).context(MalformedImageSnafu)?;
        let size = Size::new(u32::from(cols), u32::from(rows));

        let (col_spacing, row_spacing) =
            attribute::pixel_spacing(elements).context(MalformedImageSnafu)?;
        let spacing = Spacing::new(col_spacing, row_spacing, 1.0);

        let origin = Point3::from(attribute::image_position(elements).context(MalformedImageSnafu)?);
        let orientation = match attribute::image_orientation(elements).context(MalformedImageSnafu)? {
            Some(cosines) => Matrix33::from_direction_cosines(cosines),
            None => Matrix33::identity(),
        };
        let geometry = Geometry::new(origin, size, spacing, orientation);

        let mut photometric_interpretation = attribute::photometric_interpretation(elements);
        if file.transfer_syntax().is_compressed()
            && !photometric_interpretation.starts_with("MONOCHROME")
        {
            // decoders hand back interleaved RGB for color output
            photometric_interpretation = "RGB".to_string();
        }

        let rsi = Rsi::new(
            attribute::rescale_slope(elements).context(MalformedImageSnafu)?,
            attribute::rescale_intercept(elements).context(MalformedImageSnafu)?,
        );

        let meta = ImageMeta {
            modality: attribute::modality(elements),
            study_instance_uid: attribute::study_instance_uid(elements),
            series_instance_uid: attribute::series_instance_uid(elements),
            bits_stored: attribute::bits_stored(elements).context(MalformedImageSnafu)?,
            is_signed: attribute::pixel_representation(elements).context(MalformedImageSnafu)? == 1,
        };

        Ok(Image {
            geometry,
            frames,
            rsi_per_slice: vec![rsi],
            photometric_interpretation,
            planar_configuration: attribute::planar_configuration(elements)
                .context(MalformedImageSnafu)?,
            number_of_components: attribute::samples_per_pixel(elements)
                .context(MalformedImageSnafu)?,
            meta,
        })
    }
}

/// Reinterpret a native pixel data value as one frame buffer per frame,
/// each holding `samples_per_frame` samples.
pub(crate) fn split_native_frames(
    value: &PrimitiveValue,
    number_of_frames: usize,
    samples_per_frame: usize,
) -> Option<Vec<FrameBuffer>> {
    fn chunk<T: Copy>(values: &[T], n: usize, per_frame: usize) -> Option<Vec<Vec<T>>> {
        if values.len() < n * per_frame {
            return None;
        }
        if values.len() > n * per_frame {
            // trailing samples beyond the declared frames
            // (typically even-length padding)
            tracing::warn!(
                "Pixel data holds {} samples, {} frames of {} expected",
                values.len(),
                n,
                per_frame
            );
        }
        Some(
            (0..n)
                .map(|f| values[f * per_frame..(f + 1) * per_frame].to_vec())
                .collect(),
        )
    }

    let frames = match value {
        PrimitiveValue::U8(c) => chunk(c, number_of_frames, samples_per_frame)?
            .into_iter()
            .map(FrameBuffer::U8)
            .collect(),
        PrimitiveValue::I8(c) => chunk(c, number_of_frames, samples_per_frame)?
            .into_iter()
            .map(FrameBuffer::I8)
            .collect(),
        PrimitiveValue::U16(c) => chunk(c, number_of_frames, samples_per_frame)?
            .into_iter()
            .map(FrameBuffer::U16)
            .collect(),
        PrimitiveValue::I16(c) => chunk(c, number_of_frames, samples_per_frame)?
            .into_iter()
            .map(FrameBuffer::I16)
            .collect(),
        PrimitiveValue::U32(c) => chunk(c, number_of_frames, samples_per_frame)?
            .into_iter()
            .map(FrameBuffer::U32)
            .collect(),
        PrimitiveValue::I32(c) => chunk(c, number_of_frames, samples_per_frame)?
            .into_iter()
            .map(FrameBuffer::I32)
            .collect(),
        _ => return None,
    };
    Some(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(origin_z: f64, values: Vec<u16>) -> Image {
        Image::new(
            Geometry::new(
                Point3::new(0.0, 0.0, origin_z),
                Size::new(2, 1),
                Spacing::default(),
                Matrix33::identity(),
            ),
            vec![FrameBuffer::U16(values)],
            vec![Rsi::default()],
            "MONOCHROME2".to_string(),
            0,
            1,
            ImageMeta::default(),
        )
    }

    #[test]
    fn value_access_and_rsi() {
        let mut image = gray_image(0.0, vec![10, 20]);
        assert_eq!(image.value_at(0, 0, 0, 0), Some(10.0));
        assert_eq!(image.value_at(1, 0, 0, 0), Some(20.0));
        assert_eq!(image.value_at(2, 0, 0, 0), None);

        // identity law: rescaled == stored
        assert!(image.is_identity_rsi());
        assert_eq!(image.rescaled_value_at(1, 0, 0, 0), Some(20.0));

        image.rsi_per_slice[0] = Rsi::new(2.0, -5.0);
        assert!(!image.is_identity_rsi());
        assert_eq!(image.rescaled_value_at(1, 0, 0, 0), Some(35.0));
    }

    #[test]
    fn append_slice_splices_in_order() {
        let mut image = gray_image(0.0, vec![1, 2]);
        image
            .append_slice(gray_image(2.0, vec![5, 6]))
            .expect("slice should append");
        // a slice between the two, nearer to the second,
        // lands in the middle
        image
            .append_slice(gray_image(1.2, vec![3, 4]))
            .expect("slice should append");

        assert_eq!(image.geometry().slice_count(), 3);
        assert_eq!(
            image.geometry().origins(),
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.2),
                Point3::new(0.0, 0.0, 2.0),
            ]
        );
        assert_eq!(
            image.frames()[0],
            FrameBuffer::U16(vec![1, 2, 3, 4, 5, 6])
        );
        assert_eq!(image.rsi_per_slice.len(), 3);
    }

    #[test]
    fn append_slice_rejects_mismatches() {
        let mut image = gray_image(0.0, vec![1, 2]);

        let mut other = gray_image(1.0, vec![3, 4]);
        other.photometric_interpretation = "MONOCHROME1".to_string();
        assert!(image.append_slice(other).is_err());

        let mut other = gray_image(1.0, vec![3, 4]);
        other.meta.modality = Some("CT".to_string());
        assert!(image.append_slice(other).is_err());

        let other = Image::new(
            Geometry::new(
                Point3::new(0.0, 0.0, 1.0),
                Size::new(3, 1),
                Spacing::default(),
                Matrix33::identity(),
            ),
            vec![FrameBuffer::U16(vec![0, 0, 0])],
            vec![Rsi::default()],
            "MONOCHROME2".to_string(),
            0,
            1,
            ImageMeta::default(),
        );
        assert!(image.append_slice(other).is_err());
    }
}
