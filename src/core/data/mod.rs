pub mod colour;
pub mod complex;
pub mod complex_rect;
pub mod escape_result;
pub mod generation;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod point;
pub mod tile;
pub mod viewport;
