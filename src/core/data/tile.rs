use crate::core::data::generation::Generation;
use crate::core::data::pixel_rect::PixelRect;

/// A unit of work: one rectangle of the image for one render generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    pub rect: PixelRect,
    pub generation: Generation,
}

/// A computed tile, its RGB bytes laid out row-major for `tile.rect` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileResult {
    pub tile: Tile,
    pub pixels: Vec<u8>,
}
