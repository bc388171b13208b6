use std::time::Duration;

use crate::core::data::generation::Generation;
use crate::core::data::pixel_rect::PixelRect;

/// Progress notifications published by the [`RenderEngine`](crate::RenderEngine).
///
/// Events are delivered from worker threads, outside the engine's frame
/// lock, so a `RegionUpdated` of an older generation can still arrive shortly
/// after a newer render was requested. Its pixels are already in the buffer
/// and may be overwritten by the newer generation at any moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// The pixels of `region` in the shared buffer now hold `generation`.
    RegionUpdated {
        generation: Generation,
        region: PixelRect,
    },
    /// Every tile of `generation` has been written, so the buffer is final
    /// for it. With more than one worker, `RegionUpdated` events of the same
    /// generation may still be delivered after this one; they describe pixels
    /// that were already written before it was sent.
    Completed {
        generation: Generation,
        duration: Duration,
    },
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> Generation {
        match self {
            Self::RegionUpdated { generation, .. } | Self::Completed { generation, .. } => {
                *generation
            }
        }
    }
}
