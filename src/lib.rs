//! Detects WCAG 2.1 §2.3.1 photosensitive-seizure flash hazards (general
//! flashes and red flashes) in a stream of decoded video frames.

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate log;

mod color;
mod frame;
mod luminance;
mod orchestrator;
mod redfsm;
mod viewport;
mod window;

pub use frame::{Frame, FrameSource};
pub use orchestrator::{detect_flashes, detect_flashes_with_options, DetectionOptions, DetectionResult};
pub use viewport::{calc_viewport, calc_viewport_default, Viewport};

/// Describes invocation failures.
///
/// Conditions like an empty or short frame stream are not represented here;
/// they're normal, successful outcomes (see [`DetectionResult`]).
#[derive(Debug)]
pub enum Error {
    /// A caller-supplied parameter was out of range, e.g. `speed` outside
    /// `[0.2, 5]`, a non-positive `fps`, or a zero-sized frame.
    InvalidArgument(&'static str),
    /// A frame's dimensions differ from the first frame seen in the stream.
    DegenerateFrame,
    /// The frame source itself reported an error mid-stream.
    Source(Box<dyn std::error::Error + 'static>),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Error {}

/// Result shorthand using our Error enum.
pub type Result<T> = std::result::Result<T, Error>;
