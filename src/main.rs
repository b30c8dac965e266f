use log::info;
use parallel_viewers::{
    mandelbrot::FractalRequest, screen, view_state::OrbitViewState, Config, FrameSink, LogSink,
    RenderRequest, Renderer,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let precision = config.precision.resolve();
    let renderer = Renderer::new(&config, precision)?;
    let mut sink = LogSink::new();

    let request = FractalRequest::reference();
    info!(
        "fractal bounds {:?}, {} iterations",
        request.bounds, request.max_iterations
    );
    sink.present(renderer.render(&RenderRequest::Fractal(request))?);

    let orbit = OrbitViewState::default();
    let request = renderer.scene_request(screen::Size::new(640, 640), orbit.camera());
    info!(
        "scene camera {:?}, {} bounces",
        request.camera, request.max_bounces
    );
    sink.present(renderer.render(&RenderRequest::Scene(request))?);

    Ok(())
}
