use std::num::NonZeroU32;

use crate::core::data::pixel_rect::PixelRect;

/// Edge length of a square tile in pixels.
///
/// Larger tiles cost less dispatch overhead, smaller ones shorten the tail of
/// a render and the time it takes to notice a superseded generation.
pub const DEFAULT_TILE_SIZE: u32 = 64;

/// Splits a `width × height` image into a row-major grid of tiles.
///
/// Tiles on the right and bottom edges are clipped to the image, so the tiles
/// are pairwise disjoint and cover every pixel exactly once. An empty image
/// produces no tiles.
#[must_use]
pub fn tile_grid(width: u32, height: u32, tile_size: NonZeroU32) -> Vec<PixelRect> {
    let size = tile_size.get();

    (0..height)
        .step_by(size as usize)
        .flat_map(|y0| {
            (0..width).step_by(size as usize).filter_map(move |x0| {
                let x1 = x0.saturating_add(size).min(width);
                let y1 = y0.saturating_add(size).min(height);
                PixelRect::new(x0, y0, x1, y1).ok()
            })
        })
        .collect()
}
