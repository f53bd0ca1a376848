//! General-flash (luminance) analyzer: tiles a window of HLS frames into an
//! `N x N` grid and counts, per tile, the peak number of opposing luminance
//! transitions across the window. See SPEC_FULL.md §4.5.

use crate::color::LightnessFrame;

const LUMINANCE_DELTA_THRESHOLD: f64 = 0.5 * 255.0;
const LUMINANCE_FLOOR_THRESHOLD: f64 = 0.8 * 255.0;

/// Mean per-tile lightness for a single frame of the window, flattened
/// `row-major` over a `sections x sections` grid.
struct TileMeans {
    sections: usize,
    means: Vec<f64>,
}

impl TileMeans {
    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.means[row * self.sections + col]
    }
}

/// Number of tiles along the longer axis, derived from the viewport's square
/// tile side (see [`crate::viewport::calc_viewport`]), clamped to at least 1.
pub fn tile_sections(height: u32, width: u32, square_side_px: u32) -> usize {
    let longer = height.max(width);
    let side = square_side_px.max(1);
    ((longer / side) as usize).max(1)
}

fn tile_means(frame: &LightnessFrame, sections: usize) -> TileMeans {
    let (width, height) = (frame.width() as usize, frame.height() as usize);
    let tile_h = (height / sections).max(1);
    let tile_w = (width / sections).max(1);

    let mut means = vec![0.0f64; sections * sections];
    for row in 0..sections {
        let y0 = row * tile_h;
        let y1 = if row + 1 == sections { height } else { (y0 + tile_h).min(height) };
        for col in 0..sections {
            let x0 = col * tile_w;
            let x1 = if col + 1 == sections { width } else { (x0 + tile_w).min(width) };

            let mut sum = 0.0f64;
            let mut count = 0usize;
            for y in y0..y1 {
                for x in x0..x1 {
                    sum += frame.l_at(x as u32, y as u32);
                    count += 1;
                }
            }
            means[row * sections + col] = if count > 0 { sum / count as f64 } else { 0.0 };
        }
    }
    TileMeans { sections, means }
}

/// Count the peak number of opposing luminance transitions across the window,
/// one count per tile, returning the maximum over all tiles. `frames` is a
/// snapshot of the luminance deque in presentation order.
///
/// The inner skip-ahead restarts the *entire* `(row, col)` scan from scratch
/// whenever any tile registers a transition, re-entering under the bumped
/// frame pair — this is the upstream contract, reproduced literally rather
/// than only advancing past the matching tile.
pub fn opposing_transitions(frames: &[LightnessFrame], sections: usize) -> usize {
    if frames.len() < 2 {
        return 0;
    }

    let tiles: Vec<TileMeans> = frames.iter().map(|f| tile_means(f, sections)).collect();
    let mut count = vec![0usize; sections * sections];

    let mut i = 0usize;
    let mut j = 1usize;
    'outer: while j < tiles.len() {
        for row in 0..sections {
            for col in 0..sections {
                let a = tiles[i].at(row, col);
                let b = tiles[j].at(row, col);
                let diff = (a - b).abs();
                let floor = a.min(b);
                if diff > LUMINANCE_DELTA_THRESHOLD && floor < LUMINANCE_FLOOR_THRESHOLD {
                    count[row * sections + col] += 1;
                    i = j;
                    j = i + 1;
                    continue 'outer;
                }
            }
        }
        j += 1;
    }

    count.into_iter().max().unwrap_or(0)
}
