//! Ray-traced frames of a [`Scene`].

use log::debug;

use crate::{
    camera::{CameraParams, PerspectiveCamera},
    compute::Dispatcher,
    pixel::{Pixel, PixelBuffer},
    real::Real,
    scene::{surface_bias, Intersection, Scene},
    screen,
    vector::{Colour, Ray},
    viewport::{ScreenMapper, REFERENCE_SIZE},
};

pub const DEFAULT_MAX_BOUNCES: u32 = 3;

/// Distance mapped to black in [`RenderMode::Depth`].
pub const DEPTH_RANGE: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Direct light plus mirror reflections.
    Shaded,
    /// Grey ramp, white at the eye fading to black at [`DEPTH_RANGE`].
    Depth,
    /// Surface normal packed as RGB.
    Normal,
}

/// One ray-traced frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRequest {
    pub size: screen::Size,
    pub camera: CameraParams,
    /// Logical square extent of the image, centred in `size`.
    pub edge: u32,
    pub max_bounces: u32,
    pub mode: RenderMode,
}

impl SceneRequest {
    pub fn new(size: screen::Size, camera: CameraParams) -> Self {
        Self {
            size,
            camera,
            edge: REFERENCE_SIZE,
            max_bounces: DEFAULT_MAX_BOUNCES,
            mode: RenderMode::Shaded,
        }
    }
}

/// Sum of the light from every light source reaching `hit`, shaded by its material.
pub fn shade_direct<R: Real>(scene: &Scene<R>, ray: &Ray<R>, hit: &Intersection<R>) -> Colour<R> {
    let Some(material) = scene.material(hit.material) else {
        return Colour::black();
    };

    scene
        .lights()
        .filter_map(|light| light.sample(scene, hit.position, hit.normal))
        .fold(Colour::black(), |acc, sample| {
            acc + material.sample(ray, hit.position, hit.normal, &sample)
        })
}

/// Radiance along `ray`, shading at most `max_bounces` surfaces: the first
/// hit plus up to `max_bounces - 1` mirror reflections. Zero gives black.
///
/// Each surface keeps `1 - reflectiveness` of its own shading and passes the
/// rest on to whatever its mirror ray sees.
pub fn trace<R: Real>(scene: &Scene<R>, mut ray: Ray<R>, max_bounces: u32) -> Colour<R> {
    let mut colour = Colour::black();
    let mut attenuation = R::ONE;

    for _ in 0..max_bounces {
        let hit = scene.intersect(&ray);
        if !hit.is_hit {
            break;
        }

        let reflectiveness = scene
            .material(hit.material)
            .map_or(R::ZERO, |material| material.reflectiveness);
        let shaded = shade_direct(scene, &ray, &hit);

        colour = colour + shaded * ((R::ONE - reflectiveness) * attenuation);
        attenuation *= reflectiveness;
        if attenuation <= R::ZERO {
            break;
        }

        ray = Ray::new(
            hit.position + hit.normal * surface_bias(),
            ray.direction.reflect(hit.normal),
        );
    }

    colour
}

fn depth_pixel<R: Real>(hit: &Intersection<R>) -> Pixel {
    if !hit.is_hit {
        return Pixel::OPAQUE_BLACK;
    }
    let ratio = (hit.distance.to_f64() / DEPTH_RANGE).clamp(0.0, 1.0);
    let grey = (255.0 - 255.0 * ratio) as u8;
    Pixel::from_rgb(grey, grey, grey)
}

fn normal_pixel<R: Real>(hit: &Intersection<R>) -> Pixel {
    if !hit.is_hit {
        return Pixel::OPAQUE_BLACK;
    }
    let channel = |n: R| ((n.to_f64() + 1.0) * 128.0).clamp(0.0, 255.0) as u8;
    Pixel::from_rgb(
        channel(hit.normal.x),
        channel(hit.normal.y),
        channel(hit.normal.z),
    )
}

/// Colour of one primary ray in the requested mode.
pub fn sample_ray<R: Real>(
    scene: &Scene<R>,
    ray: Ray<R>,
    mode: RenderMode,
    max_bounces: u32,
) -> Pixel {
    match mode {
        RenderMode::Shaded => trace(scene, ray, max_bounces).to_pixel(),
        RenderMode::Depth => depth_pixel(&scene.intersect(&ray)),
        RenderMode::Normal => normal_pixel(&scene.intersect(&ray)),
    }
}

/// Render `request` over `scene`; the request must already be validated.
pub fn render<R: Real>(
    dispatcher: &Dispatcher,
    scene: &Scene<R>,
    request: &SceneRequest,
) -> PixelBuffer {
    debug!(
        "ray trace {}x{} eye {:?} mode {:?} bounces {}",
        request.size.width,
        request.size.height,
        request.camera.eye,
        request.mode,
        request.max_bounces
    );

    let camera = PerspectiveCamera::<R>::new(&request.camera);
    let mapper = ScreenMapper::new(request.size, request.edge);
    let (mode, max_bounces) = (request.mode, request.max_bounces);

    dispatcher.render(request.size, |x, y| {
        let (sx, sy) = mapper.map::<R>(x, y);
        sample_ray(scene, camera.generate_ray(sx, sy), mode, max_bounces)
    })
}
