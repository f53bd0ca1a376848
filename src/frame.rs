//! Decoded-frame representation and the source abstraction frames are pulled from.

use crate::{Error, Result};

/// A single decoded RGB frame, stored as a flat, row-major `width * height * 3` buffer.
///
/// Frames don't own a notion of time; presentation order is implied by the order
/// in which a [`FrameSource`] yields them.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl Frame {
    /// Build a frame from a flat RGB8 buffer.
    ///
    /// Returns [`Error::InvalidArgument`] if the buffer length doesn't match
    /// `width * height * 3`, or if either dimension is zero.
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument("frame dimensions must be non-zero"));
        }
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(Error::InvalidArgument(
                "frame buffer length does not match width * height * 3",
            ));
        }
        Ok(Self { width, height, rgb })
    }

    /// Build a frame where every pixel is the same solid color. Mostly useful for tests.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut buf = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            buf.extend_from_slice(&rgb);
        }
        Self { width, height, rgb: buf }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read the RGB triple at `(x, y)`. Panics if out of bounds; callers in this
    /// crate always iterate within `(0..width, 0..height)`.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.rgb[idx], self.rgb[idx + 1], self.rgb[idx + 2])
    }

    pub(crate) fn same_shape_as(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// A source of decoded frames, yielded in presentation order.
///
/// Mirrors the shape of a fallible box iterator: `Ok(Some(frame))` for the next
/// frame, `Ok(None)` at the end of the stream, `Err(_)` if the underlying decoder
/// hit a problem it can't recover from.
pub trait FrameSource {
    /// The error type the underlying source can report. Wrapped in [`Error::Source`]
    /// when propagated out of [`crate::detect_flashes`].
    type Err: std::error::Error + 'static;

    fn next_frame(&mut self) -> std::result::Result<Option<Frame>, Self::Err>;
}

/// An infallible error type for sources that can never fail, such as a plain
/// in-memory iterator of already-decoded frames.
#[derive(Debug)]
pub enum Infallible {}

impl std::fmt::Display for Infallible {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Infallible {}

/// Any plain iterator of already-decoded frames is a valid [`FrameSource`] with no
/// failure mode of its own; this is the common case for tests and for callers who
/// decode a whole clip up front.
impl<I: Iterator<Item = Frame>> FrameSource for I {
    type Err = Infallible;

    fn next_frame(&mut self) -> std::result::Result<Option<Frame>, Infallible> {
        Ok(self.next())
    }
}
