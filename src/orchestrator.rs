//! Drives the per-frame pipeline: color transform, red-flash window, and
//! luminance window, producing the merged danger-interval list. See
//! SPEC_FULL.md §4.6.

use std::collections::VecDeque;

use crate::color::{transform, LightnessFrame};
use crate::frame::{Frame, FrameSource};
use crate::luminance::{opposing_transitions, tile_sections};
use crate::viewport::calc_viewport_default;
use crate::window::RedFlashWindow;
use crate::{Error, Result};

/// The WCAG flash-count threshold: three or more opposing transitions within
/// a one-second window constitutes a general flash.
pub const DEFAULT_HERTZ: usize = 3;

/// Minimum gap, in seconds, below which two danger intervals are fused into one.
const MERGE_GAP_SECONDS: f64 = 3.0;

/// Overrides for [`detect_flashes`]'s WCAG defaults.
#[derive(Debug, Clone, Copy)]
pub struct DetectionOptions {
    /// Opposing-transition count at/above which a window counts as a danger.
    pub hertz: usize,
    /// Whether the luminance window may skip ahead a full second when a
    /// window shows zero opposing transitions.
    pub skip_enabled: bool,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        DetectionOptions { hertz: DEFAULT_HERTZ, skip_enabled: true }
    }
}

/// The result of a full-stream flash hazard scan.
#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
    /// Ordered, non-overlapping danger intervals, in seconds.
    pub intervals: Vec<[f64; 2]>,
    /// Diagnostic `(row, col)` markers from the red-flash window, scaled by
    /// `1 / fps`. Not time intervals; see [`crate::window::RedFlashWindow`].
    pub red_flash_markers: Vec<(f64, f64)>,
}

/// Scan `frame_source` for WCAG 2.1 §2.3.1 flash hazards, using the standard
/// thresholds (`hertz = 3`, skip-ahead enabled).
pub fn detect_flashes<S: FrameSource>(frame_source: S, fps: f64, speed: f64) -> Result<DetectionResult> {
    detect_flashes_with_options(frame_source, fps, speed, DetectionOptions::default())
}

/// Like [`detect_flashes`], but with the flash-count threshold and skip-ahead
/// behavior overridable, for callers that need to probe the thresholds
/// themselves.
pub fn detect_flashes_with_options<S: FrameSource>(
    mut frame_source: S,
    fps: f64,
    speed: f64,
    options: DetectionOptions,
) -> Result<DetectionResult> {
    if !(0.2..=5.0).contains(&speed) {
        return Err(Error::InvalidArgument("speed must be in [0.2, 5]"));
    }
    if !(fps > 0.0) {
        return Err(Error::InvalidArgument("fps must be positive"));
    }

    let window_len = ((fps * speed).round() as u64).max(1);

    let mut first_frame: Option<Frame> = None;
    let mut sections: usize = 1;

    let mut red_window = RedFlashWindow::new(window_len, fps);
    let mut luminance_deque: VecDeque<LightnessFrame> = VecDeque::with_capacity(window_len as usize);

    let mut intervals: Vec<[f64; 2]> = Vec::new();
    let mut open_start: Option<f64> = None;

    let mut i: u64 = 0;

    loop {
        let next = frame_source
            .next_frame()
            .map_err(|e| Error::Source(Box::new(e)))?;
        let frame: Frame = match next {
            Some(frame) => frame,
            None => break,
        };

        match &first_frame {
            None => {
                if frame.width() == 0 || frame.height() == 0 {
                    return Err(Error::InvalidArgument("frame dimensions must be non-zero"));
                }
                let viewport = calc_viewport_default((frame.height(), frame.width()));
                sections = tile_sections(frame.height(), frame.width(), viewport.square_side_px);
                first_frame = Some(frame.clone());
            }
            Some(first) => {
                if !first.same_shape_as(&frame) {
                    return Err(Error::DegenerateFrame);
                }
            }
        }

        let (lightness, chroma) = transform(&frame);
        red_window.admit(&chroma);

        luminance_deque.push_back(lightness);

        if luminance_deque.len() as u64 == window_len {
            let snapshot: Vec<LightnessFrame> = luminance_deque.iter().cloned().collect();
            let flashes = opposing_transitions(&snapshot, sections);

            if flashes >= options.hertz && open_start.is_none() {
                debug!("flash window opened at frame {i} ({flashes} transitions)");
                open_start = Some(i as f64);
            }
            if flashes < options.hertz {
                if let Some(start) = open_start.take() {
                    let skip_bonus = if options.skip_enabled { 2.0 } else { 0.0 };
                    intervals.push([skip_bonus + start / fps, i as f64 / fps]);
                    debug!("flash window closed at frame {i}");
                }
            }

            if options.skip_enabled && flashes == 0 {
                luminance_deque.clear();
            } else {
                luminance_deque.pop_front();
            }
        }

        i += 1;
    }

    if open_start.is_some() {
        debug!("discarding an open interval at end of stream");
    }

    Ok(DetectionResult {
        intervals: merge_intervals(intervals),
        red_flash_markers: red_window.markers().to_vec(),
    })
}

fn merge_intervals(mut intervals: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    loop {
        let mut fused = false;
        let mut merged: Vec<[f64; 2]> = Vec::with_capacity(intervals.len());
        let mut iter = intervals.into_iter();
        if let Some(mut current) = iter.next() {
            for next in iter {
                if next[0] - current[1] < MERGE_GAP_SECONDS {
                    current[1] = next[1];
                    fused = true;
                } else {
                    merged.push(current);
                    current = next;
                }
            }
            merged.push(current);
        }
        intervals = merged;
        if !fused {
            return intervals;
        }
    }
}
