//! Pixel → sample-space mapping for both pipelines.

use crate::{real::Real, screen};

/// Screen extent, in pixels, that one unit of `1 / scale` spans per half axis.
/// Also the logical square edge of the ray-traced image.
pub const REFERENCE_SIZE: u32 = 640;

/// Rectangle of the complex plane shown on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComplexRect {
    pub real_min: f64,
    pub imag_min: f64,
    pub real_max: f64,
    pub imag_max: f64,
}

impl ComplexRect {
    pub fn around(center_re: f64, center_im: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            real_min: center_re - half_width,
            imag_min: center_im - half_height,
            real_max: center_re + half_width,
            imag_max: center_im + half_height,
        }
    }

    pub fn is_valid(&self) -> bool {
        let finite = [self.real_min, self.imag_min, self.real_max, self.imag_max]
            .iter()
            .all(|bound| bound.is_finite());
        finite && self.real_min < self.real_max && self.imag_min < self.imag_max
    }

    pub fn width(&self) -> f64 {
        self.real_max - self.real_min
    }

    pub fn height(&self) -> f64 {
        self.imag_max - self.imag_min
    }

    /// Complex coordinate sampled by pixel `(x, y)`.
    ///
    /// Row 0 is the top of the image, so the imaginary axis is flipped.
    #[inline]
    pub fn map<R: Real>(&self, size: screen::Size, x: u32, y: u32) -> (R, R) {
        let real_min = R::from_f64(self.real_min);
        let imag_min = R::from_f64(self.imag_min);
        let real_step = R::from_f64(self.real_max - self.real_min) / R::from_f64(size.width as f64);
        let imag_step =
            R::from_f64(self.imag_max - self.imag_min) / R::from_f64(size.height as f64);

        let real = real_min + R::from_f64(x as f64) * real_step;
        let imag = imag_min + R::from_f64((size.height - y) as f64) * imag_step;
        (real, imag)
    }
}

/// Centre and zoom of the fractal view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalView {
    pub center_re: f64,
    pub center_im: f64,
    pub scale: f64,
}

impl FractalView {
    pub const fn new(center_re: f64, center_im: f64, scale: f64) -> Self {
        Self {
            center_re,
            center_im,
            scale,
        }
    }

    /// Bounding box for an output of `size`.
    ///
    /// `1 / scale` is the half extent of a [`REFERENCE_SIZE`] pixel span; each
    /// axis grows with its own pixel count, so resizing never stretches.
    pub fn bounds(&self, size: screen::Size) -> ComplexRect {
        let d = 1.0 / self.scale;
        let reference = REFERENCE_SIZE as f64;
        ComplexRect::around(
            self.center_re,
            self.center_im,
            d * size.width as f64 / reference,
            d * size.height as f64 / reference,
        )
    }
}

impl Default for FractalView {
    fn default() -> Self {
        Self::new(-0.5, 0.0, 0.5)
    }
}

/// Centres a square of `edge` pixels inside the output and maps pixels to
/// `[0, 1]²` screen coordinates, `y` pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMapper {
    edge: f64,
    xshift: i64,
    yshift: i64,
}

impl ScreenMapper {
    pub fn new(size: screen::Size, edge: u32) -> Self {
        Self {
            edge: edge as f64,
            xshift: (size.width as i64 - edge as i64) / 2,
            yshift: (size.height as i64 - edge as i64) / 2,
        }
    }

    #[inline]
    pub fn map<R: Real>(&self, x: u32, y: u32) -> (R, R) {
        let edge = R::from_f64(self.edge);
        let sx = R::from_f64((x as i64 - self.xshift) as f64) / edge;
        let sy = R::ONE - R::from_f64((y as i64 - self.yshift) as f64) / edge;
        (sx, sy)
    }
}
