use std::{error::Error, fmt};

use crate::core::actions::schedule_tiles::tile_scheduler::TileSchedulerError;
use crate::core::fractals::mandelbrot::errors::ConfigError;

#[derive(Debug)]
pub enum RenderEngineError {
    Config(ConfigError),
    Scheduler(TileSchedulerError),
}

impl fmt::Display for RenderEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{}", err),
            Self::Scheduler(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RenderEngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Scheduler(err) => Some(err),
        }
    }
}

impl From<ConfigError> for RenderEngineError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<TileSchedulerError> for RenderEngineError {
    fn from(err: TileSchedulerError) -> Self {
        Self::Scheduler(err)
    }
}
