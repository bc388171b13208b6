//! JSON-backed render configuration.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//! [`RenderConfig::validate`] turns the raw values into the typed settings
//! the engine runs with.

use std::fs;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::Path;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;
use crate::core::fractals::mandelbrot::errors::ConfigError;
use crate::core::util::tile_grid::DEFAULT_TILE_SIZE;

pub const DEFAULT_MAX_ITERATIONS: u32 = 256;
pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 853;

/// Classic full-set view: real axis [-2, 1] across the default width.
pub const DEFAULT_CENTER: Complex = Complex::new(-0.5, 0.0);
pub const DEFAULT_SCALE: f64 = 3.0 / DEFAULT_WIDTH as f64;

fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub max_iterations: u32,
    /// One of `fire`, `blue-white`, `pseudocolor`, `grayscale`; any case.
    pub palette_name: String,
    /// Continuous colouring instead of one band per iteration count.
    pub smooth: bool,
    /// Edge length of a square tile in pixels.
    pub tile_size: u32,
    pub worker_count: usize,
    pub view: ViewConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            palette_name: PaletteKind::default().config_name().to_string(),
            smooth: true,
            tile_size: DEFAULT_TILE_SIZE,
            worker_count: default_worker_count(),
            view: ViewConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
    pub center_real: f64,
    pub center_imag: f64,
    /// Complex-plane units per pixel.
    pub scale: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center_real: DEFAULT_CENTER.real,
            center_imag: DEFAULT_CENTER.imag,
            scale: DEFAULT_SCALE,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// A [`RenderConfig`] that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub viewport: Viewport,
    pub palette: Palette,
    pub tile_size: NonZeroU32,
    pub worker_count: NonZeroUsize,
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let kind = self.palette_name.parse::<PaletteKind>()?;
        Ok(Palette::new(kind, self.smooth))
    }

    pub fn viewport(&self) -> Result<Viewport, ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }

        let view = &self.view;
        let center = Complex::new(view.center_real, view.center_imag);

        Ok(Viewport::new(
            center,
            view.scale,
            view.width,
            view.height,
            self.max_iterations,
        )?)
    }

    pub fn validate(&self) -> Result<RenderSettings, ConfigError> {
        let viewport = self.viewport()?;
        let palette = self.palette()?;
        let tile_size = NonZeroU32::new(self.tile_size).ok_or(ConfigError::ZeroTileSize)?;
        let worker_count =
            NonZeroUsize::new(self.worker_count).ok_or(ConfigError::ZeroWorkerCount)?;

        Ok(RenderSettings {
            viewport,
            palette,
            tile_size,
            worker_count,
        })
    }
}
