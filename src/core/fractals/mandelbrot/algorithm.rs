use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::escape_result::EscapeResult;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

pub const BAILOUT_RADIUS: f64 = 2.0;

const BAILOUT_RADIUS_SQUARED: f64 = BAILOUT_RADIUS * BAILOUT_RADIUS;

/// Iterates `z -> z² + c` from `z = 0` until |z| exceeds [`BAILOUT_RADIUS`]
/// or `max_iterations` steps have run.
///
/// An orbit that overflows to infinity or NaN counts as escaped at the step
/// where it happened, so non-finite values never look like bounded points.
#[inline]
#[must_use]
pub fn escape_time(c: Complex, max_iterations: u32) -> EscapeResult {
    let mut z = Complex::ZERO;

    for iteration in 1..=max_iterations {
        z = z * z + c;
        let magnitude_squared = z.magnitude_squared();

        if !magnitude_squared.is_finite() || magnitude_squared > BAILOUT_RADIUS_SQUARED {
            return EscapeResult::escaped(iteration, magnitude_squared);
        }
    }

    EscapeResult::bounded(max_iterations, z.magnitude_squared())
}

/// Double-precision Mandelbrot evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MandelbrotAlgorithm;

impl FractalAlgorithm for MandelbrotAlgorithm {
    fn compute(&self, viewport: &Viewport, pixel: Point) -> EscapeResult {
        let c = pixel_to_complex_coords(pixel, viewport);
        escape_time(c, viewport.max_iterations())
    }

    fn display_name(&self) -> &str {
        "Mandelbrot"
    }
}
