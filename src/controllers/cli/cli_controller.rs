use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::controllers::interactive::{RenderEngine, RenderEngineError, RenderPresenterPort};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::mandelbrot::render_config::RenderConfig;
use crate::presenters::logging::log_presenter::LogPresenter;

/// Upper bound on a single command-line render.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug)]
pub enum CliError {
    Engine(RenderEngineError),
    TimedOut(Duration),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Engine(err) => write!(f, "{}", err),
            Self::TimedOut(limit) => write!(f, "render did not finish within {:?}", limit),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::TimedOut(_) => None,
        }
    }
}

impl From<RenderEngineError> for CliError {
    fn from(err: RenderEngineError) -> Self {
        Self::Engine(err)
    }
}

/// Renders the configured view once through the engine and hands the
/// finished frame to a file presenter.
pub struct CliController<P: FilePresenterPort> {
    presenter: P,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> CliController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            buffer: None,
        }
    }

    pub fn generate(&mut self, config: &RenderConfig) -> Result<(), CliError> {
        self.generate_within(config, RENDER_TIMEOUT)
    }

    pub fn generate_within(
        &mut self,
        config: &RenderConfig,
        timeout: Duration,
    ) -> Result<(), CliError> {
        let progress: Arc<dyn RenderPresenterPort> = Arc::new(LogPresenter::new());
        let engine = RenderEngine::new(config, progress)?;
        let viewport = engine.current_viewport();

        info!(
            "Rendering {}x{} at ({}, {}), {} iterations",
            viewport.width(),
            viewport.height(),
            viewport.center().real,
            viewport.center().imag,
            viewport.max_iterations()
        );

        let generation = engine.render(viewport);

        if !engine.wait_for_generation(generation, timeout) {
            return Err(CliError::TimedOut(timeout));
        }

        self.buffer = Some(engine.snapshot());

        Ok(())
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(buffer) = &self.buffer {
            self.presenter.present(buffer, filepath.as_ref())?;
            info!("Saved to {}", filepath.as_ref().display());
        }

        Ok(())
    }
}
