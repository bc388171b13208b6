use std::{error::Error, fmt, io};

use crate::core::data::viewport::ViewportError;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKindError;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    ZeroMaxIterations,
    ZeroTileSize,
    ZeroWorkerCount,
    UnknownPalette(PaletteKindError),
    Viewport(ViewportError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {}", err),
            Self::Json(err) => write!(f, "invalid config: {}", err),
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::ZeroTileSize => write!(f, "tile size must be greater than zero"),
            Self::ZeroWorkerCount => write!(f, "worker count must be greater than zero"),
            Self::UnknownPalette(err) => write!(f, "{}", err),
            Self::Viewport(err) => write!(f, "invalid view: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnknownPalette(err) => Some(err),
            Self::Viewport(err) => Some(err),
            Self::ZeroMaxIterations | Self::ZeroTileSize | Self::ZeroWorkerCount => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<PaletteKindError> for ConfigError {
    fn from(err: PaletteKindError) -> Self {
        Self::UnknownPalette(err)
    }
}

impl From<ViewportError> for ConfigError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}
