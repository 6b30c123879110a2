use super::*;

use std::io::Cursor;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use crate::foundation::core::{FrameIndex, FrameRange};

fn solid(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 6,
        height: 4,
        data: px.repeat(24),
        premultiplied: true,
    }
}

fn decode(bytes: &[u8]) -> Vec<image::Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn write_gif_keeps_frame_count_and_delays() {
    let a = solid([255, 0, 0, 255]);
    let b = solid([0, 0, 255, 255]);
    let bytes = encode_entries(
        [
            (&a, Duration::from_secs(5)),
            (&b, Duration::from_millis(20)),
            (&a, Duration::from_millis(20)),
        ],
        [255, 255, 255, 255],
    )
    .unwrap();

    let frames = decode(&bytes);
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].delay().numer_denom_ms(), (5000, 1));
    assert_eq!(frames[1].delay().numer_denom_ms(), (20, 1));

    let px = frames[1].buffer().get_pixel(2, 2).0;
    assert!(px[2] > 200 && px[0] < 40, "expected blue, got {px:?}");
}

#[test]
fn write_gif_rejects_empty_input() {
    let err = encode_entries(std::iter::empty(), [255, 255, 255, 255]).unwrap_err();
    assert!(err.to_string().contains("no frames"));
}

#[test]
fn transparent_pixels_are_flattened_over_background() {
    let clear = solid([0, 0, 0, 0]);
    let bytes = encode_entries([(&clear, Duration::from_millis(20))], [0, 255, 0, 255]).unwrap();
    let frames = decode(&bytes);
    let px = frames[0].buffer().get_pixel(0, 0).0;
    assert!(px[1] > 200 && px[0] < 40 && px[2] < 40, "got {px:?}");
}

#[test]
fn native_encoder_writes_full_loop() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("loop.gif");
    let frames = vec![solid([0, 0, 0, 255]), solid([255, 255, 255, 255])];
    let tl = LoopTimeline::ping_pong(
        FrameRange::first_n(2),
        Duration::from_millis(20),
        Duration::from_secs(5),
    )
    .unwrap();

    let mut enc = NativeGifEncoder::new(NativeGifOpts {
        out_path: out.clone(),
        bg_rgba: [255, 255, 255, 255],
    });
    enc.encode(&tl, &frames).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(decode(&bytes).len(), 2 + 2 * 2);
}

#[test]
fn native_encoder_fails_without_writing_when_frames_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("loop.gif");
    let frames = vec![solid([0, 0, 0, 255])];
    let tl = LoopTimeline::ping_pong(
        FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap(),
        Duration::from_millis(20),
        Duration::from_secs(5),
    )
    .unwrap();

    let mut enc = NativeGifEncoder::new(NativeGifOpts {
        out_path: out.clone(),
        bg_rgba: [255, 255, 255, 255],
    });
    assert!(enc.encode(&tl, &frames).is_err());
    assert!(!out.exists());
}
