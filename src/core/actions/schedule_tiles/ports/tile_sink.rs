use crate::core::data::generation::Generation;
use crate::core::data::tile::{Tile, TileResult};

/// Receives the output of tile workers.
pub trait TileSink: Send + Sync {
    /// Whether work for `generation` is still wanted. Workers poll this before
    /// starting a tile and between its rows.
    fn is_current(&self, generation: Generation) -> bool;

    /// Hands over a finished tile. Implementations must re-check the
    /// generation and drop the tile if it has been superseded meanwhile.
    fn submit(&self, result: TileResult);

    /// Called for a tile that was skipped or abandoned because its generation
    /// was superseded.
    fn discard(&self, _tile: Tile) {}
}
