//! The pixel data pipeline: slicing frames out of native pixel data,
//! grouping and decoding encapsulated fragments, and assembling the final
//! [`Image`].
//!
//! Decoding of compressed frames is delegated to a [`FrameDecoder`]
//! capability. The first frame is always decoded synchronously, so that
//! the image can be constructed with the decoder's output
//! characteristics; the remaining frames are decoded on a worker pool,
//! each landing in its own frame slot.

use crate::attribute::{self, GetAttributeError};
use crate::image::{split_native_frames, FrameBuffer, Image, ImageBuildError, ImageFactory};
use dicoview_core::tags;
use dicoview_core::value::Value;
use dicoview_encoding::transfer_syntax::PixelAlgorithm;
use dicoview_object::mem::AccessError;
use dicoview_object::FileDataSet;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use snafu::{Backtrace, IntoError, OptionExt, ResultExt, Snafu};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// An error reported by a frame decoder implementation.
#[derive(Debug, Clone, Snafu)]
#[snafu(display("Frame decoder failure: {}", message))]
pub struct DecodeError {
    /// the decoder's failure message
    pub message: String,
}

impl DecodeError {
    /// Create a new decoder error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        DecodeError {
            message: message.into(),
        }
    }
}

/// An error from the pixel pipeline.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum PipelineError {
    /// The data set has no Pixel Data element.
    #[snafu(display("Missing Pixel Data element"))]
    MissingPixelData {
        /// the underlying lookup error
        #[snafu(backtrace)]
        source: AccessError,
    },
    /// A pixel-related attribute could not be fetched.
    #[snafu(display("Could not read pixel attributes"))]
    PixelAttribute {
        /// the underlying attribute error
        #[snafu(backtrace)]
        source: GetAttributeError,
    },
    /// The image entity could not be constructed.
    #[snafu(display("Could not build the image"))]
    BuildImage {
        /// the underlying build error
        #[snafu(backtrace)]
        source: ImageBuildError,
    },
    /// The pixel data does not partition into the declared frames.
    #[snafu(display(
        "Pixel data of {} samples does not partition into {} frames of {} samples",
        total,
        frames,
        per_frame
    ))]
    InconsistentFrames {
        /// the total number of samples found
        total: usize,
        /// the declared number of frames
        frames: usize,
        /// the expected number of samples per frame
        per_frame: usize,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// The Pixel Data element holds neither a primitive value
    /// nor an encapsulated pixel sequence.
    #[snafu(display("Pixel Data element does not hold pixel data"))]
    MalformedPixelData {
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// The transfer syntax calls for a decoder, but none was provided.
    #[snafu(display("No frame decoder available for {:?} pixel data", algorithm))]
    MissingDecoder {
        /// the required algorithm
        algorithm: PixelAlgorithm,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// A frame failed to decode.
    /// The failure is also delivered to the observer's error channel.
    #[snafu(display("Could not decode frame {}", frame))]
    DecodeFrame {
        /// the index of the frame
        frame: usize,
        /// the decoder's error
        source: DecodeError,
    },
    /// The pipeline was aborted before completing.
    #[snafu(display("Pixel data loading aborted"))]
    Aborted {
        /// backtrace of the abort observation
        backtrace: Backtrace,
    },
}

/// Result alias for pipeline operations.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// The sample layout information handed to a frame decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    /// the number of rows of the frame
    pub rows: u16,
    /// the number of columns of the frame
    pub columns: u16,
    /// the number of sample components per pixel
    pub samples_per_pixel: u16,
    /// the number of bits allocated per sample
    pub bits_allocated: u16,
    /// whether the samples are signed
    pub signed: bool,
    /// the photometric interpretation declared by the data set
    pub photometric_interpretation: String,
}

/// A capability for decoding one compressed pixel data frame.
///
/// Implementations wrap the actual image codecs
/// (JPEG baseline, JPEG lossless, JPEG 2000),
/// which are external to this engine.
pub trait FrameDecoder: Sync {
    /// Decode one frame out of its compressed byte stream.
    fn decode(&self, frame: &[u8], info: &FrameInfo) -> Result<FrameBuffer, DecodeError>;
}

/// An observer of pipeline progress.
///
/// Progress notifications are monotonic in the completed count, but may
/// arrive out of frame-index order; `on_load_end` is delivered exactly
/// once, after every frame completion.
pub trait PipelineObserver: Sync {
    /// Called when the completed fraction advances, with a percentage.
    fn on_progress(&self, _percent: f32) {}

    /// Called when a frame finishes decoding.
    fn on_frame_decoded(&self, _frame: usize) {}

    /// Called when a frame decoder reports an error.
    fn on_error(&self, _error: &DecodeError) {}

    /// Called once after all frame completions.
    fn on_load_end(&self) {}
}

/// An observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {}

/// A shareable handle for cancelling a pipeline run.
///
/// Once aborted, outstanding frame decodes are dropped silently and the
/// pipeline returns no image.
#[derive(Debug, Default, Clone)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    /// Create a new, unsignalled handle.
    pub fn new() -> Self {
        AbortHandle::default()
    }

    /// Signal the pipeline to stop.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether an abort was signalled.
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// The pixel data pipeline.
pub struct PixelPipeline<'d> {
    decoder: Option<&'d dyn FrameDecoder>,
    abort: AbortHandle,
}

impl std::fmt::Debug for PixelPipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PixelPipeline")
            .field("has_decoder", &self.decoder.is_some())
            .field("aborted", &self.abort.is_aborted())
            .finish()
    }
}

impl Default for PixelPipeline<'_> {
    fn default() -> Self {
        PixelPipeline {
            decoder: None,
            abort: AbortHandle::new(),
        }
    }
}

impl<'d> PixelPipeline<'d> {
    /// Create a pipeline for native (uncompressed) pixel data only.
    pub fn new() -> Self {
        PixelPipeline::default()
    }

    /// Create a pipeline with a frame decoder for compressed pixel data.
    pub fn with_decoder(decoder: &'d dyn FrameDecoder) -> Self {
        PixelPipeline {
            decoder: Some(decoder),
            abort: AbortHandle::new(),
        }
    }

    /// Obtain a handle for cancelling this pipeline from another thread.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Run the pipeline over a parsed file, producing the image.
    ///
    /// Native pixel data is sliced into the declared number of frames.
    /// Encapsulated pixel data has its fragments grouped into frames and
    /// decoded: the first frame synchronously, the rest on a worker pool.
    pub fn load(
        &self,
        file: &FileDataSet,
        observer: &dyn PipelineObserver,
    ) -> Result<Image> {
        let elements = file.elements();
        let pixel_element = elements
            .element(tags::PIXEL_DATA)
            .context(MissingPixelDataSnafu)?;

        let rows = attribute::rows(elements).context(PixelAttributeSnafu)?;
        let cols = attribute::cols(elements).context(PixelAttributeSnafu)?;
        let samples = attribute::samples_per_pixel(elements).context(PixelAttributeSnafu)?;
        let number_of_frames =
            attribute::number_of_frames(elements).context(PixelAttributeSnafu)? as usize;
        let samples_per_frame = rows as usize * cols as usize * samples as usize;

        let algorithm = file.transfer_syntax().algorithm;

        let frames = match pixel_element.value() {
            Value::Primitive(v) => {
                if algorithm != PixelAlgorithm::None {
                    tracing::warn!(
                        "Compressed transfer syntax with non-encapsulated pixel data, \
                         reading frames as native"
                    );
                }
                let frames = split_native_frames(v, number_of_frames, samples_per_frame)
                    .context(InconsistentFramesSnafu {
                        total: v.multiplicity() as usize,
                        frames: number_of_frames,
                        per_frame: samples_per_frame,
                    })?;
                let total = frames.len();
                for done in 1..=total {
                    observer.on_progress(done as f32 / total as f32 * 100.0);
                }
                frames
            }
            Value::PixelSequence { fragments, .. } => {
                let frame_bytes = group_fragments(fragments, number_of_frames);
                let info = FrameInfo {
                    rows,
                    columns: cols,
                    samples_per_pixel: samples,
                    bits_allocated: attribute::bits_allocated(elements)
                        .context(PixelAttributeSnafu)?,
                    signed: attribute::pixel_representation(elements)
                        .context(PixelAttributeSnafu)?
                        == 1,
                    photometric_interpretation: attribute::photometric_interpretation(elements),
                };
                self.decode_frames(&frame_bytes, &info, algorithm, observer)?
            }
            Value::Sequence { .. } => return MalformedPixelDataSnafu.fail(),
        };

        let image = ImageFactory
            .build(file, frames)
            .context(BuildImageSnafu)?;
        observer.on_load_end();
        Ok(image)
    }

    /// Decode the grouped frames:
    /// frame 0 synchronously, the rest in parallel,
    /// each landing in its own slot of the output.
    fn decode_frames(
        &self,
        frame_bytes: &[Vec<u8>],
        info: &FrameInfo,
        algorithm: PixelAlgorithm,
        observer: &dyn PipelineObserver,
    ) -> Result<Vec<FrameBuffer>> {
        let decoder = self.decoder.context(MissingDecoderSnafu { algorithm })?;

        if frame_bytes.is_empty() {
            return Ok(Vec::new());
        }

        let total = frame_bytes.len();
        let completed = AtomicUsize::new(0);
        let report_done = |frame: usize| {
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            observer.on_frame_decoded(frame);
            observer.on_progress(done as f32 / total as f32 * 100.0);
        };

        let mut frames = Vec::with_capacity(total);

        // the first frame decode gates image construction
        let first = &frame_bytes[0];
        let buffer = decoder.decode(first, info).map_err(|e| {
            observer.on_error(&e);
            DecodeFrameSnafu { frame: 0usize }.into_error(e)
        })?;
        report_done(0);
        frames.push(buffer);

        // the remaining frames decode on the worker pool,
        // writing into disjoint slots
        let rest: Vec<Result<Option<FrameBuffer>>> = frame_bytes[1..]
            .par_iter()
            .enumerate()
            .map(|(i, bytes)| {
                if self.abort.is_aborted() {
                    return Ok(None);
                }
                match decoder.decode(bytes, info) {
                    Ok(buffer) => {
                        report_done(i + 1);
                        Ok(Some(buffer))
                    }
                    Err(e) => {
                        observer.on_error(&e);
                        Err(DecodeFrameSnafu { frame: i + 1 }.into_error(e))
                    }
                }
            })
            .collect();

        for outcome in rest {
            match outcome? {
                Some(buffer) => frames.push(buffer),
                None => return AbortedSnafu.fail(),
            }
        }
        if self.abort.is_aborted() {
            return AbortedSnafu.fail();
        }

        Ok(frames)
    }
}

/// Group encapsulated fragments into per-frame byte buffers.
///
/// When the number of fragments exceeds the number of frames and divides
/// evenly, consecutive fragments are concatenated in groups of
/// `fragments / frames`; otherwise every fragment is one frame.
pub(crate) fn group_fragments(fragments: &[Vec<u8>], number_of_frames: usize) -> Vec<Vec<u8>> {
    let total = fragments.len();
    if number_of_frames > 0 && total > number_of_frames && total % number_of_frames == 0 {
        let per_frame = total / number_of_frames;
        fragments
            .chunks(per_frame)
            .map(|group| group.concat())
            .collect()
    } else {
        if number_of_frames > 0 && total != number_of_frames {
            tracing::warn!(
                "{} pixel data fragments do not group into {} frames, \
                 taking one fragment per frame",
                total,
                number_of_frames
            );
        }
        fragments.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::group_fragments;

    #[test]
    fn fragment_grouping() {
        let fragments: Vec<Vec<u8>> = vec![vec![1], vec![2], vec![3], vec![4], vec![5], vec![6]];

        // one fragment per frame
        assert_eq!(group_fragments(&fragments, 6).len(), 6);

        // exact grouping: 6 fragments into 3 frames of 2
        let grouped = group_fragments(&fragments, 3);
        assert_eq!(grouped, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);

        // non-divisible counts fall back to one fragment per frame
        let grouped = group_fragments(&fragments, 4);
        assert_eq!(grouped.len(), 6);
    }
}
