pub mod cancellation;
pub mod render_tile;
pub mod schedule_tiles;
