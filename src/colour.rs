//! Colouring escape-time results.

use crate::pixel::Pixel;

pub const DEFAULT_BANDING_PERIOD: u32 = 128;

/// Banded hue colouring.
///
/// The hue follows a triangle wave over the iteration count, rising for
/// `period / 2` iterations and falling for the next `period / 2`, so
/// neighbouring bands never jump from the end of the hue range back to its
/// start. Points that never escaped are opaque black.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandedHue {
    pub period: u32,
    pub saturation: f32,
    /// How much brightness drops at the top of the hue wave.
    pub brightness_falloff: f32,
}

impl BandedHue {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            saturation: 0.7,
            brightness_falloff: 0.5,
        }
    }

    pub fn encode(&self, count: u32, max_iterations: u32) -> Pixel {
        if count >= max_iterations {
            return Pixel::OPAQUE_BLACK;
        }

        let n = count as f32 / self.period as f32;
        let hue = 1.0 - 2.0 * (0.5 - n.fract()).abs();
        let brightness = 1.0 - hue * hue * self.brightness_falloff;
        hsb_to_pixel(hue, self.saturation, brightness)
    }
}

impl Default for BandedHue {
    fn default() -> Self {
        Self::new(DEFAULT_BANDING_PERIOD)
    }
}

/// Six-sector HSB → RGB conversion.
///
/// `hue` in `[0, 1]` covers `256` degrees, so the wave never wraps round to red.
pub fn hsb_to_pixel(hue: f32, saturation: f32, brightness: f32) -> Pixel {
    let h = hue * 256.0 / 60.0;
    let sector = h as i32;
    let f = h - sector as f32;

    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (red, green, blue) = match sector {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    let quantise = |channel: f32| (channel * 255.0) as u8;
    Pixel::from_rgb(quantise(red), quantise(green), quantise(blue))
}
