use crate::core::data::escape_result::EscapeResult;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;

/// Maps a pixel onto the plane and runs the escape-time iteration there.
///
/// Mapping and evaluation sit behind one trait so the number representation
/// can change without touching the scheduler or the engine.
pub trait FractalAlgorithm {
    fn compute(&self, viewport: &Viewport, pixel: Point) -> EscapeResult;

    fn display_name(&self) -> &str;
}
