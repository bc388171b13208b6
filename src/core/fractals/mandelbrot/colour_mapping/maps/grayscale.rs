use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::maps::pseudocolor::hsb_to_colour;

#[must_use]
pub fn grayscale(t: f64) -> Colour {
    hsb_to_colour(0.0, 0.0, t.clamp(0.0, 1.0))
}
