use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one render request. Later requests always get larger values;
/// `Generation::NONE` stands for "nothing requested yet".
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The single piece of shared mutable state between the engine and the
/// tile workers: which generation is currently active.
#[derive(Debug, Default)]
pub struct GenerationClock {
    current: AtomicU64,
}

impl GenerationClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, invalidating every earlier one.
    pub fn advance(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    #[must_use]
    pub fn current(&self) -> Generation {
        Generation(self.current.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }
}
