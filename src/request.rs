//! Frame requests and the renderer that serves them.

use std::time::Instant;

use log::{debug, info};

use crate::{
    camera::CameraParams,
    colour::BandedHue,
    compute::Dispatcher,
    config::Config,
    error::{Error, Result},
    mandelbrot::{self, FractalRequest, IterationBudget},
    pixel::PixelBuffer,
    precision::Precision,
    raytrace::{self, SceneRequest},
    scene::Scene,
    screen,
    viewport::FractalView,
};

/// What the window layer asks for on show, resize, pan or zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderRequest {
    Fractal(FractalRequest),
    Scene(SceneRequest),
}

impl RenderRequest {
    pub fn size(&self) -> screen::Size {
        match self {
            RenderRequest::Fractal(request) => request.size,
            RenderRequest::Scene(request) => request.size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let size = self.size();
        if size.is_empty() {
            return Err(Error::InvalidViewport(format!(
                "{}x{} has no pixels",
                size.width, size.height
            )));
        }

        match self {
            RenderRequest::Fractal(request) => {
                if !request.bounds.is_valid() {
                    return Err(Error::InvalidViewport(format!(
                        "degenerate bounds {:?}",
                        request.bounds
                    )));
                }
            }
            RenderRequest::Scene(request) => {
                if request.edge == 0 {
                    return Err(Error::InvalidViewport("edge must be positive".to_string()));
                }
                if !request.camera.is_valid() {
                    return Err(Error::InvalidViewport(format!(
                        "unusable camera {:?}",
                        request.camera
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Renders frames for one session at a fixed [`Precision`].
pub struct Renderer {
    dispatcher: Dispatcher,
    precision: Precision,
    colouring: BandedHue,
    budget: IterationBudget,
    max_bounces: u32,
    scene_f32: Scene<f32>,
    scene_f64: Scene<f64>,
}

impl Renderer {
    pub fn new(config: &Config, precision: Precision) -> Result<Self> {
        let dispatcher = Dispatcher::new(config.threads)?;
        info!(
            "renderer: {} threads, {} precision",
            dispatcher.threads(),
            precision.as_str()
        );

        Ok(Self {
            dispatcher,
            precision,
            colouring: BandedHue::new(config.banding_period),
            budget: IterationBudget::new(IterationBudget::default().base, config.max_iterations),
            max_bounces: config.max_bounces,
            scene_f32: Scene::default_scene()?,
            scene_f64: Scene::default_scene()?,
        })
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// A fractal request for `view`, with the iteration budget capped by
    /// the configured maximum.
    pub fn fractal_request(&self, size: screen::Size, view: &FractalView) -> FractalRequest {
        FractalRequest::from_view(size, view, &self.budget)
    }

    /// A shaded scene request using the configured bounce limit.
    pub fn scene_request(&self, size: screen::Size, camera: CameraParams) -> SceneRequest {
        let mut request = SceneRequest::new(size, camera);
        request.max_bounces = self.max_bounces;
        request
    }

    pub fn render(&self, request: &RenderRequest) -> Result<PixelBuffer> {
        request.validate()?;

        let started = Instant::now();
        let frame = match (request, self.precision) {
            (RenderRequest::Fractal(request), Precision::Single) => {
                mandelbrot::render::<f32>(&self.dispatcher, request, &self.colouring)
            }
            (RenderRequest::Fractal(request), Precision::Double) => {
                mandelbrot::render::<f64>(&self.dispatcher, request, &self.colouring)
            }
            (RenderRequest::Scene(request), Precision::Single) => {
                raytrace::render(&self.dispatcher, &self.scene_f32, request)
            }
            (RenderRequest::Scene(request), Precision::Double) => {
                raytrace::render(&self.dispatcher, &self.scene_f64, request)
            }
        };
        debug!("rendered in {:?}", started.elapsed());

        Ok(frame)
    }
}
