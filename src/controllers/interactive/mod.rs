//! Interactive rendering engine.
//!
//! The engine follows the ports & adapters pattern:
//! - **Input**: [`Viewport`](crate::core::data::viewport::Viewport) changes passed to
//!   [`RenderEngine::render`]
//! - **Output**: [`RenderPresenterPort`] receiving [`RenderEvent`]s as tiles land
//! - **Core**: tile scheduling and per-pixel work from `core/`

pub mod data;
mod engine;
pub mod errors;
pub mod events;
pub mod ports;

pub use data::render_stats::RenderStats;
pub use engine::RenderEngine;
pub use errors::render_engine_error::RenderEngineError;
pub use events::render_event::RenderEvent;
pub use ports::presenter_port::RenderPresenterPort;
