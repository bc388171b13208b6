use mandelbrot_viewer::{CliController, PpmFilePresenter, RenderConfig};

const OUTPUT_PATH: &str = "output/mandelbrot.ppm";

/// Usage: `mandelbrot_viewer [config.json]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            RenderConfig::load(path)?
        }
        None => RenderConfig::default(),
    };

    let mut controller = CliController::new(PpmFilePresenter::new());

    controller.generate(&config)?;
    controller.write(OUTPUT_PATH)?;

    Ok(())
}
