pub mod ports;
pub mod tile_scheduler;
