mod controllers;
mod core;
mod presenters;

pub use crate::controllers::cli::cli_controller::{CliController, CliError};
pub use crate::controllers::interactive::{
    RenderEngine, RenderEngineError, RenderEvent, RenderPresenterPort, RenderStats,
};
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::core::actions::render_tile::ports::colour_map::ColourMap;
pub use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::schedule_tiles::tile_scheduler::{TileScheduler, TileSchedulerError};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
pub use crate::core::data::escape_result::EscapeResult;
pub use crate::core::data::generation::Generation;
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::pixel_rect::PixelRect;
pub use crate::core::data::point::Point;
pub use crate::core::data::viewport::{Viewport, ViewportError};
pub use crate::core::fractals::mandelbrot::algorithm::{MandelbrotAlgorithm, escape_time};
pub use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
pub use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;
pub use crate::core::fractals::mandelbrot::errors::ConfigError;
pub use crate::core::fractals::mandelbrot::render_config::{RenderConfig, RenderSettings, ViewConfig};
pub use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;
pub use crate::presenters::file::ppm::PpmFilePresenter;
pub use crate::presenters::logging::log_presenter::LogPresenter;
