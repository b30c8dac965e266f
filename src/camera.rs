use crate::{
    real::Real,
    vector::{Ray, Vec3},
};

/// Camera placement in `f64`, converted to the session precision per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub eye: [f64; 3],
    /// Look direction; normalised when the camera is built.
    pub front: [f64; 3],
    pub up: [f64; 3],
    /// Field of view in degrees.
    pub fov: f64,
}

impl CameraParams {
    pub fn is_valid(&self) -> bool {
        let finite = self
            .eye
            .iter()
            .chain(&self.front)
            .chain(&self.up)
            .all(|value| value.is_finite());
        let front = Vec3::<f64>::from_f64(self.front[0], self.front[1], self.front[2]);
        let up = Vec3::<f64>::from_f64(self.up[0], self.up[1], self.up[2]);
        finite
            && self.fov > 0.0
            && self.fov < 180.0
            && front.cross(up).sqr_length() > f64::EPSILON
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PerspectiveCamera<R> {
    eye: Vec3<R>,
    front: Vec3<R>,
    right: Vec3<R>,
    up: Vec3<R>,
    fov_scale: R,
}

impl<R: Real> PerspectiveCamera<R> {
    pub fn new(params: &CameraParams) -> Self {
        let [ex, ey, ez] = params.eye;
        let [fx, fy, fz] = params.front;
        let [ux, uy, uz] = params.up;

        let front = Vec3::from_f64(fx, fy, fz).normalize();
        let right = front.cross(Vec3::from_f64(ux, uy, uz)).normalize();
        let up = right.cross(front);
        let fov_scale = R::from_f64((params.fov * 0.5).to_radians().tan() * 2.0);

        Self {
            eye: Vec3::from_f64(ex, ey, ez),
            front,
            right,
            up,
            fov_scale,
        }
    }

    /// Ray through screen coordinate `(sx, sy)` in `[0, 1]²`, `(0.5, 0.5)`
    /// being the centre of view.
    pub fn generate_ray(&self, sx: R, sy: R) -> Ray<R> {
        let half = R::from_f64(0.5);
        let r = self.right * ((sx - half) * self.fov_scale);
        let u = self.up * ((sy - half) * self.fov_scale);
        Ray::new(self.eye, (self.front + r + u).normalize())
    }
}
