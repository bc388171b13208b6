use std::fmt;

use crate::core::actions::schedule_tiles::ports::tile_sink::TileSink;
use crate::core::data::generation::Generation;

/// A tile render gave up because its token fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile render cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Polled by tile workers between rows.
pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// Token for one-shot renders that always run to the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Fires once `sink` no longer wants tiles of `generation`, i.e. as soon as a
/// newer render has been requested.
pub struct GenerationToken<'a, S: ?Sized> {
    sink: &'a S,
    generation: Generation,
}

impl<'a, S: TileSink + ?Sized> GenerationToken<'a, S> {
    pub fn new(sink: &'a S, generation: Generation) -> Self {
        Self { sink, generation }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl<S: TileSink + ?Sized> CancelToken for GenerationToken<'_, S> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        !self.sink.is_current(self.generation)
    }
}
