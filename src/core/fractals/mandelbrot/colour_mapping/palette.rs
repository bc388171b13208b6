use std::f64::consts::LN_2;

use crate::core::actions::render_tile::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::escape_result::EscapeResult;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;

/// Colour applied to points that never escaped.
pub const IN_SET_COLOUR: Colour = Colour::BLACK;

/// Continuous escape count `n + 1 - log2(ln |z|)`, which removes the bands
/// between whole iteration counts.
///
/// Falls back to the plain count when |z|² is not finite or too small for
/// the double logarithm; never returns NaN or a negative value.
#[must_use]
pub fn smooth_iteration_count(result: &EscapeResult) -> f64 {
    let n = f64::from(result.iterations);
    let magnitude_squared = result.magnitude_squared;

    if !magnitude_squared.is_finite() || magnitude_squared <= 1.0 {
        return n;
    }

    let log_modulus = magnitude_squared.ln() / 2.0;
    let smooth = n + 1.0 - log_modulus.ln() / LN_2;

    if smooth.is_finite() { smooth.max(0.0) } else { n }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    kind: PaletteKind,
    smooth: bool,
}

impl Palette {
    #[must_use]
    pub fn new(kind: PaletteKind, smooth: bool) -> Self {
        Self { kind, smooth }
    }

    #[must_use]
    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    #[must_use]
    pub fn is_smooth(&self) -> bool {
        self.smooth
    }
}

impl ColourMap for Palette {
    fn colour_for(&self, result: &EscapeResult, max_iterations: u32) -> Colour {
        if !result.escaped {
            return IN_SET_COLOUR;
        }

        let value = if self.smooth {
            smooth_iteration_count(result)
        } else {
            f64::from(result.iterations)
        };

        let t = value / f64::from(max_iterations.max(1));

        self.kind.colour_at(t.clamp(0.0, 1.0))
    }

    fn display_name(&self) -> &str {
        self.kind.display_name()
    }
}
