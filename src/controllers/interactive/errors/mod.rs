pub mod render_engine_error;
