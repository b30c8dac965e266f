use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::real::Real;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3<R> {
    pub x: R,
    pub y: R,
    pub z: R,
}

impl<R: Real> Vec3<R> {
    pub const fn new(x: R, y: R, z: R) -> Self {
        Self { x, y, z }
    }

    pub fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self::new(R::from_f64(x), R::from_f64(y), R::from_f64(z))
    }

    pub fn zero() -> Self {
        Self::new(R::ZERO, R::ZERO, R::ZERO)
    }

    pub fn dot(self, rhs: Self) -> R {
        (self.x * rhs.x) + (self.y * rhs.y) + (self.z * rhs.z)
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            (self.y * rhs.z) - (self.z * rhs.y),
            (self.z * rhs.x) - (self.x * rhs.z),
            (self.x * rhs.y) - (self.y * rhs.x),
        )
    }

    pub fn sqr_length(self) -> R {
        self.dot(self)
    }

    pub fn length(self) -> R {
        self.sqr_length().sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == R::ZERO {
            return self;
        }
        self / len
    }

    /// Mirror `self` about the unit `normal`.
    pub fn reflect(self, normal: Self) -> Self {
        self - (normal * (R::from_f64(2.0) * self.dot(normal)))
    }
}

impl<R: Real> Add for Vec3<R> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<R: Real> Sub for Vec3<R> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<R: Real> Mul<R> for Vec3<R> {
    type Output = Self;
    fn mul(self, rhs: R) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<R: Real> Div<R> for Vec3<R> {
    type Output = Self;
    fn div(self, rhs: R) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<R: Real> Neg for Vec3<R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray<R> {
    pub origin: Vec3<R>,
    pub direction: Vec3<R>,
}

impl<R: Real> Ray<R> {
    pub const fn new(origin: Vec3<R>, direction: Vec3<R>) -> Self {
        Self { origin, direction }
    }

    pub fn at(self, t: R) -> Vec3<R> {
        self.origin + (self.direction * t)
    }
}

/// Linear RGB radiance; unbounded until [`Colour::to_pixel`] saturates it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Colour<R> {
    pub r: R,
    pub g: R,
    pub b: R,
}

impl<R: Real> Colour<R> {
    pub const fn new(r: R, g: R, b: R) -> Self {
        Self { r, g, b }
    }

    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::new(R::from_f64(r), R::from_f64(g), R::from_f64(b))
    }

    pub fn black() -> Self {
        Self::new(R::ZERO, R::ZERO, R::ZERO)
    }

    pub fn white() -> Self {
        Self::new(R::ONE, R::ONE, R::ONE)
    }

    pub fn red() -> Self {
        Self::new(R::ONE, R::ZERO, R::ZERO)
    }

    pub fn green() -> Self {
        Self::new(R::ZERO, R::ONE, R::ZERO)
    }

    pub fn blue() -> Self {
        Self::new(R::ZERO, R::ZERO, R::ONE)
    }

    /// Saturate each channel to `[0, 1]` and quantise to 8 bits.
    pub fn to_pixel(self) -> crate::pixel::Pixel {
        let quantise = |channel: R| {
            let clamped = channel.max(R::ZERO).min(R::ONE).to_f32();
            (clamped * 255.0) as u8
        };
        crate::pixel::Pixel::from_rgb(quantise(self.r), quantise(self.g), quantise(self.b))
    }
}

impl<R: Real> Add for Colour<R> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl<R: Real> Mul<R> for Colour<R> {
    type Output = Self;
    fn mul(self, rhs: R) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl<R: Real> Mul for Colour<R> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}
