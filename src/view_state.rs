//! User-adjusted view parameters, changed only between frames.
//!
//! Both views follow the same drag protocol: [`begin_drag`] snapshots the
//! view, every [`drag_to`] recomputes it from that snapshot and the total
//! pointer offset, and [`end_drag`] returns to idle. Zooming works in either
//! state.
//!
//! [`begin_drag`]: FractalViewState::begin_drag
//! [`drag_to`]: FractalViewState::drag_to
//! [`end_drag`]: FractalViewState::end_drag

use crate::{camera::CameraParams, viewport::FractalView};

/// Wheel zoom factor per notch for the fractal.
pub const FRACTAL_ZOOM_FACTOR: f64 = 1.2;

/// Wheel dolly factor per notch for the ray tracer.
pub const ORBIT_DOLLY_FACTOR: f64 = 1.1;

/// Pixels of drag that pan the fractal by `1 / scale`.
pub const PAN_PIXELS_PER_UNIT: f64 = 320.0;

/// Orbit rotation per pixel of drag, in radians.
pub const ORBIT_RADIANS_PER_PIXEL: f64 = 0.01;

/// Elevation limit, short of the poles where the up reference degenerates.
pub const MAX_ELEVATION: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drag<A> {
    Idle,
    Dragging {
        /// Pointer position when the drag started.
        start: (f64, f64),
        /// View as it was when the drag started.
        anchor: A,
    },
}

impl<A: Copy> Drag<A> {
    fn begin(&mut self, start: (f64, f64), anchor: A) {
        *self = Drag::Dragging { start, anchor };
    }

    /// Offset from the drag start, with `y` pointing up, and the snapshot.
    fn offset(&self, pointer: (f64, f64)) -> Option<((f64, f64), A)> {
        match *self {
            Drag::Idle => None,
            Drag::Dragging { start, anchor } => {
                Some(((pointer.0 - start.0, start.1 - pointer.1), anchor))
            }
        }
    }

    fn end(&mut self) {
        *self = Drag::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Drag::Dragging { .. })
    }
}

/// Pan/zoom state of the fractal explorer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalViewState {
    view: FractalView,
    drag: Drag<(f64, f64)>,
}

impl FractalViewState {
    pub fn new(view: FractalView) -> Self {
        Self {
            view,
            drag: Drag::Idle,
        }
    }

    pub fn view(&self) -> FractalView {
        self.view
    }

    pub fn drag(&self) -> Drag<(f64, f64)> {
        self.drag
    }

    /// Shift the centre by a screen-pixel delta (`y` up).
    pub fn apply_pan(&mut self, delta: (f64, f64)) {
        let unit = PAN_PIXELS_PER_UNIT * self.view.scale;
        self.view.center_re -= delta.0 / unit;
        self.view.center_im -= delta.1 / unit;
    }

    pub fn apply_zoom(&mut self, factor: f64) {
        self.view.scale *= factor;
    }

    /// Positive notches zoom in, negative zoom out.
    pub fn wheel(&mut self, notches: i32) {
        self.apply_zoom(FRACTAL_ZOOM_FACTOR.powi(notches));
    }

    pub fn begin_drag(&mut self, pointer: (f64, f64)) {
        let center = (self.view.center_re, self.view.center_im);
        self.drag.begin(pointer, center);
    }

    /// Returns whether the view changed.
    pub fn drag_to(&mut self, pointer: (f64, f64)) -> bool {
        let Some((delta, (center_re, center_im))) = self.drag.offset(pointer) else {
            return false;
        };
        self.view.center_re = center_re;
        self.view.center_im = center_im;
        self.apply_pan(delta);
        true
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }
}

impl Default for FractalViewState {
    fn default() -> Self {
        Self::new(FractalView::default())
    }
}

/// Camera orbiting a fixed target, for the ray tracer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub target: [f64; 3],
    /// Rotation about the vertical axis, radians; `0` looks down `-z`.
    pub azimuth: f64,
    /// Angle above the horizontal plane, radians.
    pub elevation: f64,
    pub distance: f64,
    /// Field of view, degrees.
    pub fov: f64,
}

impl Orbit {
    pub fn camera(&self) -> CameraParams {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let offset = [cos_el * sin_az, sin_el, cos_el * cos_az];

        CameraParams {
            eye: [
                self.target[0] + offset[0] * self.distance,
                self.target[1] + offset[1] * self.distance,
                self.target[2] + offset[2] * self.distance,
            ],
            front: [-offset[0], -offset[1], -offset[2]],
            up: [0.0, 1.0, 0.0],
            fov: self.fov,
        }
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            target: [0.0, 10.0, -10.0],
            azimuth: 0.0,
            elevation: 0.0,
            distance: 20.0,
            fov: 90.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitViewState {
    orbit: Orbit,
    drag: Drag<(f64, f64)>,
}

impl OrbitViewState {
    pub fn new(orbit: Orbit) -> Self {
        Self {
            orbit,
            drag: Drag::Idle,
        }
    }

    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    pub fn camera(&self) -> CameraParams {
        self.orbit.camera()
    }

    pub fn drag(&self) -> Drag<(f64, f64)> {
        self.drag
    }

    /// Rotate by a screen-pixel delta (`y` up).
    pub fn apply_pan(&mut self, delta: (f64, f64)) {
        self.orbit.azimuth -= delta.0 * ORBIT_RADIANS_PER_PIXEL;
        self.orbit.elevation = (self.orbit.elevation - delta.1 * ORBIT_RADIANS_PER_PIXEL)
            .clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Divides the eye distance: factors above one move closer.
    pub fn apply_zoom(&mut self, factor: f64) {
        self.orbit.distance /= factor;
    }

    pub fn wheel(&mut self, notches: i32) {
        self.apply_zoom(ORBIT_DOLLY_FACTOR.powi(notches));
    }

    pub fn begin_drag(&mut self, pointer: (f64, f64)) {
        let angles = (self.orbit.azimuth, self.orbit.elevation);
        self.drag.begin(pointer, angles);
    }

    pub fn drag_to(&mut self, pointer: (f64, f64)) -> bool {
        let Some((delta, (azimuth, elevation))) = self.drag.offset(pointer) else {
            return false;
        };
        self.orbit.azimuth = azimuth;
        self.orbit.elevation = elevation;
        self.apply_pan(delta);
        true
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }
}

impl Default for OrbitViewState {
    fn default() -> Self {
        Self::new(Orbit::default())
    }
}
