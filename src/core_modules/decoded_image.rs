// THEORY:
// The engine never decodes files itself. It consumes anything that can report a
// width, a height, and the RGBA value at (x, y). Two sources are supported:
// - `image::RgbaImage`, produced by the `image_helper` decoding collaborator
// - `RawFrame`, a borrowed, tightly packed RGBA byte buffer such as a camera frame

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::error::SilhouetteError;
use image::RgbaImage;

/// A decoded raster with per-pixel RGBA access.
///
/// Callers guarantee `x < width()` and `y < height()`; out-of-range reads panic.
pub trait DecodedImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> Pixel;
}

impl DecodedImage for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        Pixel::from(*self.get_pixel(x, y))
    }
}

/// A row-major RGBA8 buffer borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> RawFrame<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, SilhouetteError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(SilhouetteError::FrameSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl DecodedImage for RawFrame<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside frame");
        let byte_index = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let bytes = &self.data[byte_index..byte_index + CHANNELS];
        Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}
