use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(2)).is_err());
}

#[test]
fn frame_range_iterates_in_both_directions() {
    let r = FrameRange::first_n(3);
    let fwd: Vec<u64> = r.iter().map(|f| f.0).collect();
    let rev: Vec<u64> = r.iter().rev().map(|f| f.0).collect();
    assert_eq!(fwd, vec![0, 1, 2]);
    assert_eq!(rev, vec![2, 1, 0]);
    assert_eq!(r.last(), Some(FrameIndex(2)));
    assert_eq!(FrameRange::first_n(0).last(), None);
}

#[test]
fn canvas_narrowing_and_byte_len() {
    let c = Canvas {
        width: 460,
        height: 540,
    };
    assert_eq!(c.to_u16().unwrap(), (460, 540));
    assert_eq!(c.rgba8_len(), 460 * 540 * 4);

    let too_wide = Canvas {
        width: 70_000,
        height: 1,
    };
    assert!(too_wide.to_u16().is_err());
}
