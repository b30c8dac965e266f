//! Parallel per-pixel kernels for two interactive viewers: a Mandelbrot set
//! explorer and a small ray-traced scene.
//!
//! A frame is one [`RenderRequest`] in and one [`PixelBuffer`] out. The
//! window, input handling and blitting are left to the caller, which keeps
//! its view in a [`view_state`] type and hands finished frames to a
//! [`FrameSink`].

pub mod camera;
pub mod colour;
pub mod compute;
pub mod config;
pub mod error;
pub mod mandelbrot;
pub mod pixel;
pub mod precision;
pub mod raytrace;
pub mod real;
pub mod request;
pub mod scene;
pub mod screen;
pub mod sink;
pub mod vector;
pub mod view_state;
pub mod viewport;

pub use config::Config;
pub use error::{Error, Result};
pub use pixel::{Pixel, PixelBuffer};
pub use precision::{Precision, PrecisionPolicy};
pub use request::{RenderRequest, Renderer};
pub use sink::{FrameSink, LogSink};
