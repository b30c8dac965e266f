//! Packed pixels and the frame buffer handed to a [`FrameSink`](crate::sink::FrameSink).

use std::borrow::Cow;
use std::hash::Hasher;

use bytemuck::{Pod, Zeroable};
use fnv::FnvHasher;

use crate::screen;

/// A `0xAARRGGBB` colour.
///
/// Stored as a native `u32`; [`PixelBuffer::as_bytes`] gives the little-endian
/// bytes B, G, R, A, the layout of a top-down BGRA bitmap.
#[repr(transparent)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub u32);

impl Pixel {
    pub const OPAQUE_BLACK: Self = Pixel(0xff00_0000);

    /// Pack 8-bit channels into an opaque pixel.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Pixel(0xff00_0000 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::OPAQUE_BLACK
    }
}

/// Dense, row-major frame of [`Pixel`]s.
///
/// Produced by exactly one dispatch and never written again afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: screen::Size,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    pub(crate) fn new(size: screen::Size) -> Self {
        Self {
            size,
            pixels: vec![Pixel::default(); size.pixel_count()],
        }
    }

    pub fn size(&self) -> screen::Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.size.width as usize * std::mem::size_of::<Pixel>()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.size.index(x, y)).copied()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Rows of `B, G, R, A` bytes. Borrowed on little-endian targets.
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        if cfg!(target_endian = "little") {
            Cow::Borrowed(bytemuck::cast_slice(&self.pixels))
        } else {
            Cow::Owned(self.pixels.iter().flat_map(|pixel| pixel.0.to_le_bytes()).collect())
        }
    }

    /// FNV-1a digest of the buffer's bytes.
    pub fn digest(&self) -> u64 {
        let mut hasher = FnvHasher::default();
        hasher.write(&self.as_bytes());
        hasher.finish()
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}
