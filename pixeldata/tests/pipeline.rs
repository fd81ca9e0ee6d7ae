//! End-to-end pixel pipeline tests over a crafted encapsulated file,
//! with a deterministic stub decoder in place of the real codecs.

use dicoview_object::FileDataSet;
use dicoview_pixeldata::pipeline::{
    DecodeError, FrameDecoder, FrameInfo, PipelineObserver, PixelPipeline,
};
use dicoview_pixeldata::FrameBuffer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Craft an Explicit VR Little Endian file with JPEG baseline
/// encapsulated pixel data: 3 frames in 3 fragments of a 1×1 RGB image.
fn encapsulated_file() -> Vec<u8> {
    let mut data = vec![0u8; 128];
    data.extend_from_slice(b"DICM");
    // (0002,0000) FileMetaInformationGroupLength: 8 + 22
    data.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 30, 0, 0, 0]);
    // (0002,0010) TransferSyntaxUID: JPEG Baseline (Process 1)
    data.extend_from_slice(&[0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x16, 0x00]);
    data.extend_from_slice(b"1.2.840.10008.1.2.4.50");

    let explicit_us = |data: &mut Vec<u8>, tag: [u8; 4], value: u16| {
        data.extend_from_slice(&tag);
        data.extend_from_slice(&[b'U', b'S', 0x02, 0x00]);
        data.extend_from_slice(&value.to_le_bytes());
    };

    // (0028,0002) SamplesPerPixel = 3
    explicit_us(&mut data, [0x28, 0x00, 0x02, 0x00], 3);
    // (0028,0004) PhotometricInterpretation = "YBR_FULL_422" (forced to RGB)
    data.extend_from_slice(&[0x28, 0x00, 0x04, 0x00, b'C', b'S', 0x0c, 0x00]);
    data.extend_from_slice(b"YBR_FULL_422");
    // (0028,0008) NumberOfFrames = "3 "
    data.extend_from_slice(&[0x28, 0x00, 0x08, 0x00, b'I', b'S', 0x02, 0x00]);
    data.extend_from_slice(b"3 ");
    // (0028,0010) Rows = 1 ; (0028,0011) Columns = 1
    explicit_us(&mut data, [0x28, 0x00, 0x10, 0x00], 1);
    explicit_us(&mut data, [0x28, 0x00, 0x11, 0x00], 1);
    // (0028,0100) BitsAllocated = 8
    explicit_us(&mut data, [0x28, 0x00, 0x00, 0x01], 8);

    // (7FE0,0010) PixelData, OB, undefined length
    data.extend_from_slice(&[
        0xe0, 0x7f, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
    ]);
    // empty basic offset table
    data.extend_from_slice(&[0xfe, 0xff, 0x00, 0xe0, 0x00, 0x00, 0x00, 0x00]);
    // one fragment per frame, tagged by their first byte
    for seed in [10u8, 20, 30] {
        data.extend_from_slice(&[0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[seed, 0xab, 0xcd, 0xef]);
    }
    // sequence delimitation item
    data.extend_from_slice(&[0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00]);
    data
}

/// A stub decoder producing a deterministic 1×1 RGB pixel per frame,
/// derived from the fragment's first byte.
struct StubDecoder;

impl FrameDecoder for StubDecoder {
    fn decode(&self, frame: &[u8], info: &FrameInfo) -> Result<FrameBuffer, DecodeError> {
        if info.bits_allocated != 8 {
            return Err(DecodeError::new("only 8-bit samples supported"));
        }
        let seed = *frame.first().ok_or_else(|| DecodeError::new("empty frame"))?;
        Ok(FrameBuffer::U8(vec![seed, seed + 1, seed + 2]))
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
    load_ends: AtomicUsize,
}

impl PipelineObserver for RecordingObserver {
    fn on_progress(&self, percent: f32) {
        self.events
            .lock()
            .unwrap()
            .push(format!("progress {}", percent));
    }

    fn on_frame_decoded(&self, frame: usize) {
        self.events.lock().unwrap().push(format!("decoded {}", frame));
    }

    fn on_error(&self, error: &DecodeError) {
        self.events.lock().unwrap().push(format!("error {}", error));
    }

    fn on_load_end(&self) {
        self.load_ends.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push("load end".to_string());
    }
}

#[test]
fn encapsulated_decode_one_fragment_per_frame() {
    let data = encapsulated_file();
    let file = FileDataSet::parse(&data).expect("file should parse");

    let decoder = StubDecoder;
    let pipeline = PixelPipeline::with_decoder(&decoder);
    let observer = RecordingObserver::default();

    let image = pipeline.load(&file, &observer).expect("pipeline should load");

    // one decoded RGB pixel per frame
    assert_eq!(image.frame_count(), 3);
    assert_eq!(image.frames()[0], FrameBuffer::U8(vec![10, 11, 12]));
    assert_eq!(image.frames()[1], FrameBuffer::U8(vec![20, 21, 22]));
    assert_eq!(image.frames()[2], FrameBuffer::U8(vec![30, 31, 32]));
    assert_eq!(image.number_of_components(), 3);

    // the codec output contract forces RGB
    assert_eq!(image.photometric_interpretation(), "RGB");

    // load end arrives exactly once, after every frame completion
    assert_eq!(observer.load_ends.load(Ordering::SeqCst), 1);
    let events = observer.events.lock().unwrap();
    assert_eq!(events.last().unwrap(), "load end");
    let decoded = events.iter().filter(|e| e.starts_with("decoded")).count();
    assert_eq!(decoded, 3);
    assert!(events.iter().all(|e| !e.starts_with("error")));
}

#[test]
fn decoder_failure_is_surfaced() {
    let data = encapsulated_file();
    let file = FileDataSet::parse(&data).expect("file should parse");

    struct FailingDecoder;
    impl FrameDecoder for FailingDecoder {
        fn decode(&self, _frame: &[u8], _info: &FrameInfo) -> Result<FrameBuffer, DecodeError> {
            Err(DecodeError::new("bad bitstream"))
        }
    }

    let decoder = FailingDecoder;
    let pipeline = PixelPipeline::with_decoder(&decoder);
    let observer = RecordingObserver::default();

    let outcome = pipeline.load(&file, &observer);
    assert!(outcome.is_err());
    // the failure also reaches the observer's error channel
    let events = observer.events.lock().unwrap();
    assert!(events.iter().any(|e| e.starts_with("error")));
    // no load end for a failed run
    assert_eq!(observer.load_ends.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_decoder_is_an_error() {
    let data = encapsulated_file();
    let file = FileDataSet::parse(&data).expect("file should parse");

    let pipeline = PixelPipeline::new();
    let outcome = pipeline.load(&file, &dicoview_pixeldata::pipeline::NullObserver);
    assert!(outcome.is_err());
}

#[test]
fn aborted_pipeline_returns_no_image() {
    let data = encapsulated_file();
    let file = FileDataSet::parse(&data).expect("file should parse");

    let decoder = StubDecoder;
    let pipeline = PixelPipeline::with_decoder(&decoder);
    pipeline.abort_handle().abort();

    let outcome = pipeline.load(&file, &dicoview_pixeldata::pipeline::NullObserver);
    assert!(outcome.is_err());
}

/// Native multi-frame pixel data splits into equal slices
/// without any decoder involved.
#[test]
fn native_multi_frame_split() {
    let mut data = vec![0u8; 128];
    data.extend_from_slice(b"DICM");
    // (0002,0000): 8 + 20
    data.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 28, 0, 0, 0]);
    // (0002,0010) Explicit VR Little Endian
    data.extend_from_slice(&[0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00]);
    data.extend_from_slice(b"1.2.840.10008.1.2.1\0");

    let explicit_us = |data: &mut Vec<u8>, tag: [u8; 4], value: u16| {
        data.extend_from_slice(&tag);
        data.extend_from_slice(&[b'U', b'S', 0x02, 0x00]);
        data.extend_from_slice(&value.to_le_bytes());
    };
    // 2×2, two frames, 16 bits
    data.extend_from_slice(&[0x28, 0x00, 0x08, 0x00, b'I', b'S', 0x02, 0x00]);
    data.extend_from_slice(b"2 ");
    explicit_us(&mut data, [0x28, 0x00, 0x10, 0x00], 2);
    explicit_us(&mut data, [0x28, 0x00, 0x11, 0x00], 2);
    explicit_us(&mut data, [0x28, 0x00, 0x00, 0x01], 16);
    // (7FE0,0010) OW, 16 bytes: frame 0 = [1,2,3,4], frame 1 = [5,6,7,8]
    data.extend_from_slice(&[
        0xe0, 0x7f, 0x10, 0x00, b'O', b'W', 0x00, 0x00, 0x10, 0x00, 0x00, 0x00,
    ]);
    for v in 1u16..=8 {
        data.extend_from_slice(&v.to_le_bytes());
    }

    let file = FileDataSet::parse(&data).expect("file should parse");
    let pipeline = PixelPipeline::new();
    let image = pipeline
        .load(&file, &dicoview_pixeldata::pipeline::NullObserver)
        .expect("pipeline should load");

    assert_eq!(image.frame_count(), 2);
    assert_eq!(image.frames()[0], FrameBuffer::U16(vec![1, 2, 3, 4]));
    assert_eq!(image.frames()[1], FrameBuffer::U16(vec![5, 6, 7, 8]));
    assert_eq!(image.value_at(1, 1, 0, 1), Some(8.0));
    assert!(image.is_identity_rsi());
}
