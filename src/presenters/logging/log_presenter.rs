use log::{info, trace};

use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::RenderPresenterPort;

/// Reports render progress through the `log` facade. Used by the command-line
/// driver, which has no screen to refresh.
#[derive(Debug, Default)]
pub struct LogPresenter {}

impl LogPresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl RenderPresenterPort for LogPresenter {
    fn present(&self, event: RenderEvent) {
        match event {
            RenderEvent::RegionUpdated { generation, region } => trace!(
                "generation {}: {}x{} region at ({}, {}) updated",
                generation,
                region.width(),
                region.height(),
                region.top_left().x,
                region.top_left().y
            ),
            RenderEvent::Completed {
                generation,
                duration,
            } => info!("generation {} rendered in {:?}", generation, duration),
        }
    }
}
