pub mod render_stats;
