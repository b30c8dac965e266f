//! Escape-time rendering of the Mandelbrot set.

use log::debug;

use crate::{
    colour::BandedHue,
    compute::Dispatcher,
    pixel::PixelBuffer,
    real::Real,
    screen,
    viewport::{ComplexRect, FractalView},
};

/// Squared escape radius.
const BAILOUT: f64 = 4.0;

const REFERENCE_SIDE: u32 = 640;
pub const REFERENCE_MAX_ITERATIONS: u32 = 1024;

/// Number of `z ← z² + c` steps, starting from `z = 0`, before `|z|² ≥ 4`.
///
/// Returns `max_iterations` for points that have not escaped by then.
#[inline]
pub fn escape_count<R: Real>(cx: R, cy: R, max_iterations: u32) -> u32 {
    let bailout = R::from_f64(BAILOUT);
    let two = R::from_f64(2.0);

    let mut zx = R::ZERO;
    let mut zy = R::ZERO;
    let mut count = 0;

    while count < max_iterations && zx * zx + zy * zy < bailout {
        let next_zx = zx * zx - zy * zy + cx;
        zy = two * zx * zy + cy;
        zx = next_zx;
        count += 1;
    }

    count
}

/// Iteration budget that grows with zoom depth, keeping shallow views cheap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationBudget {
    pub base: f64,
    pub cap: u32,
}

impl IterationBudget {
    pub fn new(base: f64, cap: u32) -> Self {
        Self { base, cap }
    }

    /// `clamp(base * ln(1 + scale), 1, cap)`
    pub fn for_scale(&self, scale: f64) -> u32 {
        let budget = self.base * scale.max(0.0).ln_1p();
        (budget as u32).clamp(1, self.cap.max(1))
    }
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self::new(128.0, 4096)
    }
}

/// One fractal frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalRequest {
    pub size: screen::Size,
    pub bounds: ComplexRect,
    pub max_iterations: u32,
}

impl FractalRequest {
    pub fn new(size: screen::Size, bounds: ComplexRect, max_iterations: u32) -> Self {
        Self {
            size,
            bounds,
            max_iterations,
        }
    }

    /// Request for `view` on a `size` output, iterations picked by `budget`.
    pub fn from_view(size: screen::Size, view: &FractalView, budget: &IterationBudget) -> Self {
        Self::new(size, view.bounds(size), budget.for_scale(view.scale))
    }

    /// The 640x640 spiral near `-0.7468 + 0.1137i`, half-width 0.001,
    /// at 1024 iterations.
    pub fn reference() -> Self {
        Self::new(
            screen::Size::new(REFERENCE_SIDE, REFERENCE_SIDE),
            ComplexRect::around(-0.7468, 0.1137, 0.001, 0.001),
            REFERENCE_MAX_ITERATIONS,
        )
    }
}

/// Render `request`; the request must already be validated.
pub fn render<R: Real>(
    dispatcher: &Dispatcher,
    request: &FractalRequest,
    colouring: &BandedHue,
) -> PixelBuffer {
    debug!(
        "mandelbrot {}x{} bounds {:?} max_iterations {}",
        request.size.width, request.size.height, request.bounds, request.max_iterations
    );

    let FractalRequest {
        size,
        bounds,
        max_iterations,
    } = *request;

    dispatcher.render(size, |x, y| {
        let (cx, cy) = bounds.map::<R>(size, x, y);
        colouring.encode(escape_count(cx, cy, max_iterations), max_iterations)
    })
}
