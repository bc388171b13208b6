use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::render_tile::ports::colour_map::ColourMap;
use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_buffer::BYTES_PER_PIXEL;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;

/// Computes and colours every pixel of `rect`, returning row-major RGB bytes.
///
/// For cancel-aware rendering, use [`render_tile_cancelable`].
pub fn render_tile<Alg, CMap>(
    rect: PixelRect,
    viewport: &Viewport,
    algorithm: &Alg,
    colour_map: &CMap,
) -> Vec<u8>
where
    Alg: FractalAlgorithm + ?Sized,
    CMap: ColourMap + ?Sized,
{
    match render_tile_cancelable(rect, viewport, algorithm, colour_map, &NeverCancel) {
        Ok(pixels) => pixels,
        Err(Cancelled) => unreachable!("NeverCancel token should never signal cancellation"),
    }
}

/// Like [`render_tile`], but polls `cancel` before each row and gives up with
/// [`Cancelled`] as soon as it fires. A pixel is never interrupted midway.
pub fn render_tile_cancelable<Alg, CMap, C>(
    rect: PixelRect,
    viewport: &Viewport,
    algorithm: &Alg,
    colour_map: &CMap,
    cancel: &C,
) -> Result<Vec<u8>, Cancelled>
where
    Alg: FractalAlgorithm + ?Sized,
    CMap: ColourMap + ?Sized,
    C: CancelToken + ?Sized,
{
    let max_iterations = viewport.max_iterations();
    let mut pixels = Vec::with_capacity(rect.size() as usize * BYTES_PER_PIXEL);

    for y in rect.y_range() {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        for x in rect.x_range() {
            let result = algorithm.compute(viewport, Point { x, y });
            let colour = colour_map.colour_for(&result, max_iterations);
            pixels.extend_from_slice(&colour.to_bytes());
        }
    }

    Ok(pixels)
}
