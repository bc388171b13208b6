/// Tile counters accumulated over the lifetime of an engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Tiles written into the buffer.
    pub tiles_applied: u64,
    /// Tiles skipped, abandoned or rejected because a newer generation had
    /// started.
    pub tiles_discarded: u64,
}
