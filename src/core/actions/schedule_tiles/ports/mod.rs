pub mod tile_sink;
