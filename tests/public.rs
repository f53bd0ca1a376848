// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use flash_hazard::{detect_flashes, Error, Frame};

fn init() {
    let _ = env_logger::builder().is_test(true).filter_level(log::LevelFilter::max()).try_init();
}

fn solid(rgb: [u8; 3], frames: usize) -> Vec<Frame> {
    (0..frames).map(|_| Frame::solid(16, 16, rgb)).collect()
}

fn alternating(a: [u8; 3], b: [u8; 3], frames: usize) -> Vec<Frame> {
    (0..frames)
        .map(|i| if i % 2 == 0 { Frame::solid(16, 16, a) } else { Frame::solid(16, 16, b) })
        .collect()
}

#[test]
fn solid_black_five_seconds_has_no_danger_intervals() {
    init();
    let frames = solid([0, 0, 0], 150);
    let result = detect_flashes(frames.into_iter(), 30.0, 1.0).expect("detect_flashes failed");
    assert!(result.intervals.is_empty());
    assert!(result.red_flash_markers.is_empty());
}

#[test]
fn alternating_black_and_white_two_seconds_reports_a_danger_interval() {
    init();
    let frames = alternating([255, 255, 255], [0, 0, 0], 60);
    let result = detect_flashes(frames.into_iter(), 30.0, 1.0).expect("detect_flashes failed");
    assert!(!result.intervals.is_empty(), "expected at least one danger interval");
    for window in result.intervals.windows(2) {
        assert!(window[0][1] <= window[1][0]);
    }
}

#[test]
fn alternating_red_and_blue_produces_red_flash_markers() {
    init();
    let frames = alternating([255, 0, 0], [0, 0, 255], 90);
    let result = detect_flashes(frames.into_iter(), 30.0, 1.0).expect("detect_flashes failed");
    assert!(
        !result.red_flash_markers.is_empty(),
        "saturated red/blue alternation should trip the red-flash FSM"
    );
}

#[test]
fn two_danger_bursts_close_together_are_fused() {
    init();
    let mut frames = alternating([255, 255, 255], [0, 0, 0], 30);
    frames.extend(solid([0, 0, 0], 60)); // 2s of black between bursts
    frames.extend(alternating([255, 255, 255], [0, 0, 0], 30));
    let result = detect_flashes(frames.into_iter(), 30.0, 1.0).expect("detect_flashes failed");
    assert!(result.intervals.len() <= 1, "a 2s gap should fuse the two bursts into one interval");
}

#[test]
fn two_danger_bursts_far_apart_stay_separate() {
    init();
    let mut frames = alternating([255, 255, 255], [0, 0, 0], 30);
    frames.extend(solid([0, 0, 0], 150)); // 5s of black between bursts
    frames.extend(alternating([255, 255, 255], [0, 0, 0], 30));
    let result = detect_flashes(frames.into_iter(), 30.0, 1.0).expect("detect_flashes failed");
    assert_eq!(result.intervals.len(), 2, "a 5s gap should keep the two bursts as separate intervals");
}

#[test]
fn speed_above_five_is_rejected_before_any_frame_is_consumed() {
    init();
    let frames = solid([128, 128, 128], 10);
    let err = detect_flashes(frames.into_iter(), 30.0, 6.0).expect_err("expected InvalidArgument");
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn speed_below_point_two_is_rejected() {
    init();
    let frames = solid([128, 128, 128], 10);
    let err = detect_flashes(frames.into_iter(), 30.0, 0.1).expect_err("expected InvalidArgument");
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn empty_stream_returns_an_empty_result() {
    init();
    let frames: Vec<Frame> = Vec::new();
    let result = detect_flashes(frames.into_iter(), 30.0, 1.0).expect("detect_flashes failed");
    assert!(result.intervals.is_empty());
}

#[test]
fn short_stream_never_opens_a_window_and_returns_cleanly() {
    init();
    let frames = alternating([255, 255, 255], [0, 0, 0], 5); // well under one window
    let result = detect_flashes(frames.into_iter(), 30.0, 1.0).expect("detect_flashes failed");
    assert!(result.intervals.is_empty());
}
