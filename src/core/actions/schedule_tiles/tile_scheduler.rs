use std::error::Error;
use std::fmt;
use std::num::{NonZeroU32, NonZeroUsize};
use std::sync::Arc;

use log::trace;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::core::actions::cancellation::{Cancelled, GenerationToken};
use crate::core::actions::render_tile::ports::colour_map::ColourMap;
use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::render_tile::render_tile::{render_tile, render_tile_cancelable};
use crate::core::actions::schedule_tiles::ports::tile_sink::TileSink;
use crate::core::data::generation::Generation;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::tile::{Tile, TileResult};
use crate::core::data::viewport::Viewport;
use crate::core::util::tile_grid::tile_grid;

#[derive(Debug)]
pub enum TileSchedulerError {
    ThreadPool(ThreadPoolBuildError),
}

impl fmt::Display for TileSchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadPool(err) => write!(f, "failed to start tile workers: {}", err),
        }
    }
}

impl Error for TileSchedulerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
        }
    }
}

/// Splits renders into tiles and runs them on a fixed-size rayon pool.
///
/// Tiles are queued first-in first-out, so they tend to finish top to bottom,
/// but completion order is not guaranteed. Workers cooperate with
/// cancellation: a tile of a superseded generation is skipped before it
/// starts, abandoned at the next row boundary, and rejected by the sink if it
/// finishes anyway.
pub struct TileScheduler {
    pool: ThreadPool,
    tile_size: NonZeroU32,
}

impl fmt::Debug for TileScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileScheduler")
            .field("workers", &self.worker_count())
            .field("tile_size", &self.tile_size)
            .finish()
    }
}

impl TileScheduler {
    pub fn new(
        worker_count: NonZeroUsize,
        tile_size: NonZeroU32,
    ) -> Result<Self, TileSchedulerError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count.get())
            .thread_name(|index| format!("tile-worker-{}", index))
            .build()
            .map_err(TileSchedulerError::ThreadPool)?;

        Ok(Self { pool, tile_size })
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[must_use]
    pub fn tile_size(&self) -> NonZeroU32 {
        self.tile_size
    }

    /// Every tile of `viewport`, tagged with `generation`.
    #[must_use]
    pub fn plan(&self, viewport: &Viewport, generation: Generation) -> Vec<Tile> {
        tile_grid(viewport.width(), viewport.height(), self.tile_size)
            .into_iter()
            .map(|rect| Tile { rect, generation })
            .collect()
    }

    /// Queues `tiles` on the worker pool and returns immediately. Each tile
    /// ends in exactly one call to either [`TileSink::submit`] or
    /// [`TileSink::discard`].
    pub fn dispatch<Alg, CMap, S>(
        &self,
        tiles: Vec<Tile>,
        viewport: Viewport,
        algorithm: Arc<Alg>,
        colour_map: Arc<CMap>,
        sink: Arc<S>,
    ) where
        Alg: FractalAlgorithm + Send + Sync + ?Sized + 'static,
        CMap: ColourMap + Send + Sync + ?Sized + 'static,
        S: TileSink + ?Sized + 'static,
    {
        for tile in tiles {
            let algorithm = Arc::clone(&algorithm);
            let colour_map = Arc::clone(&colour_map);
            let sink = Arc::clone(&sink);

            self.pool.spawn_fifo(move || {
                run_tile(tile, &viewport, algorithm.as_ref(), colour_map.as_ref(), sink.as_ref());
            });
        }
    }

    /// Renders a whole viewport on the pool and blocks until it is done.
    /// No generations are involved; used for one-shot renders and benchmarks.
    #[must_use]
    pub fn render_all<Alg, CMap>(
        &self,
        viewport: &Viewport,
        algorithm: &Alg,
        colour_map: &CMap,
    ) -> PixelBuffer
    where
        Alg: FractalAlgorithm + Sync + ?Sized,
        CMap: ColourMap + Sync + ?Sized,
    {
        let tiles = tile_grid(viewport.width(), viewport.height(), self.tile_size);

        let rendered: Vec<_> = self.pool.install(|| {
            tiles
                .into_par_iter()
                .map(|rect| (rect, render_tile(rect, viewport, algorithm, colour_map)))
                .collect()
        });

        let mut buffer = PixelBuffer::new(viewport.width(), viewport.height());

        for (rect, pixels) in rendered {
            buffer
                .write_rect(rect, &pixels)
                .expect("grid tiles lie inside the viewport and match their pixel data");
        }

        buffer
    }
}

fn run_tile<Alg, CMap, S>(
    tile: Tile,
    viewport: &Viewport,
    algorithm: &Alg,
    colour_map: &CMap,
    sink: &S,
) where
    Alg: FractalAlgorithm + ?Sized,
    CMap: ColourMap + ?Sized,
    S: TileSink + ?Sized,
{
    let token = GenerationToken::new(sink, tile.generation);

    match render_tile_cancelable(tile.rect, viewport, algorithm, colour_map, &token) {
        Ok(pixels) => sink.submit(TileResult { tile, pixels }),
        Err(Cancelled) => {
            trace!(
                "abandoned tile at ({}, {}) of generation {}",
                tile.rect.top_left().x,
                tile.rect.top_left().y,
                tile.generation
            );
            sink.discard(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::data::escape_result::EscapeResult;
    use crate::core::data::generation::GenerationClock;
    use crate::core::data::point::Point;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::time::Duration;

    #[derive(Debug)]
    struct StubAlgorithm {}

    impl FractalAlgorithm for StubAlgorithm {
        fn compute(&self, _: &Viewport, pixel: Point) -> EscapeResult {
            EscapeResult::escaped((pixel.x * 7 + pixel.y * 3) % 251, 0.0)
        }

        fn display_name(&self) -> &str {
            "Stub"
        }
    }

    #[derive(Debug)]
    struct StubColourMap {}

    impl ColourMap for StubColourMap {
        fn colour_for(&self, result: &EscapeResult, _: u32) -> Colour {
            Colour {
                r: result.iterations as u8,
                g: 0,
                b: 255 - result.iterations as u8,
            }
        }

        fn display_name(&self) -> &str {
            "Stub"
        }
    }

    #[derive(Debug)]
    enum Outcome {
        Submitted(TileResult),
        Discarded(Tile),
    }

    struct ChannelSink {
        clock: GenerationClock,
        outcomes: Sender<Outcome>,
    }

    impl TileSink for ChannelSink {
        fn is_current(&self, generation: Generation) -> bool {
            self.clock.is_current(generation)
        }

        fn submit(&self, result: TileResult) {
            self.outcomes.send(Outcome::Submitted(result)).unwrap();
        }

        fn discard(&self, tile: Tile) {
            self.outcomes.send(Outcome::Discarded(tile)).unwrap();
        }
    }

    fn channel_sink() -> (Arc<ChannelSink>, Receiver<Outcome>) {
        let (tx, rx) = mpsc::channel();
        let sink = ChannelSink {
            clock: GenerationClock::new(),
            outcomes: tx,
        };

        (Arc::new(sink), rx)
    }

    fn scheduler(workers: usize, tile_size: u32) -> TileScheduler {
        TileScheduler::new(
            NonZeroUsize::new(workers).unwrap(),
            NonZeroU32::new(tile_size).unwrap(),
        )
        .unwrap()
    }

    fn viewport(width: u32, height: u32) -> Viewport {
        Viewport::new(Complex::ZERO, 0.01, width, height, 32).unwrap()
    }

    fn collect(rx: &Receiver<Outcome>, count: usize) -> Vec<Outcome> {
        (0..count)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect()
    }

    #[test]
    fn test_scheduler_uses_requested_worker_count() {
        let scheduler = scheduler(3, 16);

        assert_eq!(scheduler.worker_count(), 3);
        assert_eq!(scheduler.tile_size().get(), 16);
    }

    #[test]
    fn test_plan_tags_every_tile_with_generation() {
        let scheduler = scheduler(2, 16);
        let tiles = scheduler.plan(&viewport(40, 20), Generation::new(7));

        assert_eq!(tiles.len(), 6);
        assert!(tiles.iter().all(|t| t.generation == Generation::new(7)));
    }

    #[test]
    fn test_dispatch_submits_every_tile_of_current_generation() {
        let scheduler = scheduler(4, 16);
        let viewport = viewport(70, 45);
        let (sink, rx) = channel_sink();
        let generation = sink.clock.advance();
        let tiles = scheduler.plan(&viewport, generation);
        let tile_count = tiles.len();

        scheduler.dispatch(
            tiles,
            viewport,
            Arc::new(StubAlgorithm {}),
            Arc::new(StubColourMap {}),
            Arc::clone(&sink),
        );

        let mut assembled = PixelBuffer::new(70, 45);
        for outcome in collect(&rx, tile_count) {
            match outcome {
                Outcome::Submitted(result) => {
                    assert_eq!(result.tile.generation, generation);
                    assembled
                        .write_rect(result.tile.rect, &result.pixels)
                        .unwrap();
                }
                Outcome::Discarded(tile) => panic!("unexpected discard of {:?}", tile),
            }
        }

        let expected = scheduler.render_all(&viewport, &StubAlgorithm {}, &StubColourMap {});
        assert_eq!(assembled, expected);
    }

    #[test]
    fn test_dispatch_discards_tiles_of_superseded_generation() {
        let scheduler = scheduler(2, 8);
        let viewport = viewport(32, 32);
        let (sink, rx) = channel_sink();
        let stale = sink.clock.advance();
        let tiles = scheduler.plan(&viewport, stale);
        let tile_count = tiles.len();

        sink.clock.advance();
        scheduler.dispatch(
            tiles,
            viewport,
            Arc::new(StubAlgorithm {}),
            Arc::new(StubColourMap {}),
            Arc::clone(&sink),
        );

        let outcomes = collect(&rx, tile_count);
        assert!(
            outcomes
                .iter()
                .all(|o| matches!(o, Outcome::Discarded(t) if t.generation == stale))
        );
    }

    #[test]
    fn test_render_all_is_deterministic_across_pool_sizes() {
        let viewport = viewport(57, 33);

        let single = scheduler(1, 64).render_all(&viewport, &StubAlgorithm {}, &StubColourMap {});
        let many = scheduler(4, 5).render_all(&viewport, &StubAlgorithm {}, &StubColourMap {});

        assert_eq!(single, many);
        assert_eq!(
            single.pixel(Point { x: 10, y: 2 }),
            Some(Colour {
                r: 76,
                g: 0,
                b: 179
            })
        );
    }
}
