/// Outcome of iterating a single point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EscapeResult {
    /// Iterations performed before escape, or `max_iterations` for bounded points.
    pub iterations: u32,
    /// |z|² at escape or at cutoff. May be non-finite when the orbit overflowed.
    pub magnitude_squared: f64,
    pub escaped: bool,
}

impl EscapeResult {
    #[must_use]
    pub fn bounded(max_iterations: u32, magnitude_squared: f64) -> Self {
        Self {
            iterations: max_iterations,
            magnitude_squared,
            escaped: false,
        }
    }

    #[must_use]
    pub fn escaped(iterations: u32, magnitude_squared: f64) -> Self {
        Self {
            iterations,
            magnitude_squared,
            escaped: true,
        }
    }
}
