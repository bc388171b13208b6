pub mod log_presenter;
