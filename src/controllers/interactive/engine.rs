use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, error, info, trace};

use crate::controllers::interactive::data::render_stats::RenderStats;
use crate::controllers::interactive::errors::render_engine_error::RenderEngineError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::RenderPresenterPort;
use crate::core::actions::render_tile::ports::colour_map::ColourMap;
use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::schedule_tiles::ports::tile_sink::TileSink;
use crate::core::actions::schedule_tiles::tile_scheduler::TileScheduler;
use crate::core::data::generation::{Generation, GenerationClock};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::tile::{Tile, TileResult};
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;
use crate::core::fractals::mandelbrot::render_config::{RenderConfig, RenderSettings};

struct Frame {
    buffer: PixelBuffer,
    viewport: Viewport,
    pending_tiles: usize,
    started: Instant,
    last_completed: Generation,
}

struct EngineShared {
    clock: GenerationClock,
    frame: Mutex<Frame>,
    completed: Condvar,
    presenter_port: Arc<dyn RenderPresenterPort>,
    tiles_applied: AtomicU64,
    tiles_discarded: AtomicU64,
}

impl EngineShared {
    fn lock_frame(&self) -> MutexGuard<'_, Frame> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_discard(&self, tile: Tile) {
        self.tiles_discarded.fetch_add(1, Ordering::Relaxed);
        trace!(
            "discarded tile at ({}, {}) of generation {}",
            tile.rect.top_left().x,
            tile.rect.top_left().y,
            tile.generation
        );
    }
}

impl TileSink for EngineShared {
    fn is_current(&self, generation: Generation) -> bool {
        self.clock.is_current(generation)
    }

    fn submit(&self, result: TileResult) {
        let TileResult { tile, pixels } = result;

        let completed = {
            let mut frame = self.lock_frame();

            // The clock only advances under this lock, so the check holds
            // until the write below is done.
            if !self.clock.is_current(tile.generation) {
                drop(frame);
                self.record_discard(tile);
                return;
            }

            if let Err(err) = frame.buffer.write_rect(tile.rect, &pixels) {
                error!("dropping tile of generation {}: {}", tile.generation, err);
            } else {
                self.tiles_applied.fetch_add(1, Ordering::Relaxed);
            }

            frame.pending_tiles = frame.pending_tiles.saturating_sub(1);

            if frame.pending_tiles == 0 {
                frame.last_completed = tile.generation;
                Some(frame.started.elapsed())
            } else {
                None
            }
        };

        self.presenter_port.present(RenderEvent::RegionUpdated {
            generation: tile.generation,
            region: tile.rect,
        });

        if let Some(duration) = completed {
            debug!("generation {} completed in {:?}", tile.generation, duration);
            self.presenter_port.present(RenderEvent::Completed {
                generation: tile.generation,
                duration,
            });
            self.completed.notify_all();
        }
    }

    fn discard(&self, tile: Tile) {
        self.record_discard(tile);
    }
}

/// Owns the pixel buffer and turns each viewport change into a new render
/// generation.
///
/// [`render`](Self::render) returns as soon as the tiles are queued. Workers
/// write finished tiles straight into the shared buffer and the presenter
/// port is told about every updated region. Starting a new generation makes
/// all work of earlier ones stale: queued tiles are skipped, running tiles
/// stop at their next row, and finished ones are rejected before they reach
/// the buffer.
pub struct RenderEngine<Alg = MandelbrotAlgorithm> {
    shared: Arc<EngineShared>,
    scheduler: TileScheduler,
    algorithm: Arc<Alg>,
    palette: Arc<Palette>,
}

impl RenderEngine<MandelbrotAlgorithm> {
    pub fn new(
        config: &RenderConfig,
        presenter_port: Arc<dyn RenderPresenterPort>,
    ) -> Result<Self, RenderEngineError> {
        Self::with_algorithm(config, MandelbrotAlgorithm, presenter_port)
    }
}

impl<Alg> RenderEngine<Alg>
where
    Alg: FractalAlgorithm + Send + Sync + 'static,
{
    pub fn with_algorithm(
        config: &RenderConfig,
        algorithm: Alg,
        presenter_port: Arc<dyn RenderPresenterPort>,
    ) -> Result<Self, RenderEngineError> {
        let settings = config.validate()?;
        Self::from_settings(settings, algorithm, presenter_port)
    }

    pub fn from_settings(
        settings: RenderSettings,
        algorithm: Alg,
        presenter_port: Arc<dyn RenderPresenterPort>,
    ) -> Result<Self, RenderEngineError> {
        let scheduler = TileScheduler::new(settings.worker_count, settings.tile_size)?;
        let viewport = settings.viewport;

        info!(
            "{} engine ready: {} workers, {}px tiles, {} palette (smooth: {})",
            algorithm.display_name(),
            scheduler.worker_count(),
            scheduler.tile_size(),
            settings.palette.display_name(),
            settings.palette.is_smooth()
        );

        let shared = Arc::new(EngineShared {
            clock: GenerationClock::new(),
            frame: Mutex::new(Frame {
                buffer: PixelBuffer::new(viewport.width(), viewport.height()),
                viewport,
                pending_tiles: 0,
                started: Instant::now(),
                last_completed: Generation::NONE,
            }),
            completed: Condvar::new(),
            presenter_port,
            tiles_applied: AtomicU64::new(0),
            tiles_discarded: AtomicU64::new(0),
        });

        Ok(Self {
            shared,
            scheduler,
            algorithm: Arc::new(algorithm),
            palette: Arc::new(settings.palette),
        })
    }

    /// Starts rendering `viewport` as a new generation and returns without
    /// waiting for any tile. The buffer is reallocated only when the image
    /// size changes; otherwise the previous picture stays visible until the
    /// new tiles overwrite it.
    pub fn render(&self, viewport: Viewport) -> Generation {
        let (generation, tiles) = {
            let mut frame = self.shared.lock_frame();
            let generation = self.shared.clock.advance();

            if frame.buffer.width() != viewport.width()
                || frame.buffer.height() != viewport.height()
            {
                frame.buffer = PixelBuffer::new(viewport.width(), viewport.height());
            }

            let tiles = self.scheduler.plan(&viewport, generation);

            frame.viewport = viewport;
            frame.pending_tiles = tiles.len();
            frame.started = Instant::now();

            (generation, tiles)
        };

        debug!(
            "generation {}: {}x{} at ({}, {}) scale {:e}, {} iterations, {} tiles",
            generation,
            viewport.width(),
            viewport.height(),
            viewport.center().real,
            viewport.center().imag,
            viewport.scale(),
            viewport.max_iterations(),
            tiles.len()
        );

        self.scheduler.dispatch(
            tiles,
            viewport,
            Arc::clone(&self.algorithm),
            Arc::clone(&self.palette),
            Arc::clone(&self.shared),
        );

        generation
    }

    /// Blocks until `generation`, or a later one, has completed. Returns
    /// `false` if that did not happen within `timeout`, which is always the
    /// case for a generation that was superseded and no newer one finished.
    pub fn wait_for_generation(&self, generation: Generation, timeout: Duration) -> bool {
        let frame = self.shared.lock_frame();

        let (frame, _) = self
            .shared
            .completed
            .wait_timeout_while(frame, timeout, |frame| frame.last_completed < generation)
            .unwrap_or_else(PoisonError::into_inner);

        frame.last_completed >= generation
    }

    /// A copy of the buffer as it is right now, possibly mid-generation.
    #[must_use]
    pub fn snapshot(&self) -> PixelBuffer {
        self.shared.lock_frame().buffer.clone()
    }

    #[must_use]
    pub fn current_generation(&self) -> Generation {
        self.shared.clock.current()
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> Generation {
        self.shared.lock_frame().last_completed
    }

    /// The viewport of the latest render request, or the configured one
    /// before the first request.
    #[must_use]
    pub fn current_viewport(&self) -> Viewport {
        self.shared.lock_frame().viewport
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        *self.palette
    }

    #[must_use]
    pub fn stats(&self) -> RenderStats {
        RenderStats {
            tiles_applied: self.shared.tiles_applied.load(Ordering::Relaxed),
            tiles_discarded: self.shared.tiles_discarded.load(Ordering::Relaxed),
        }
    }
}

impl<Alg> Drop for RenderEngine<Alg> {
    fn drop(&mut self) {
        // Supersede whatever is still queued so the pool drains quickly.
        let _frame = self.shared.lock_frame();
        self.shared.clock.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::data::escape_result::EscapeResult;
    use crate::core::data::point::Point;
    use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
    use std::num::{NonZeroU32, NonZeroUsize};
    use std::thread;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }

        /// Region events of other workers can trail `Completed`.
        fn wait_for_events(&self, count: usize) -> Vec<RenderEvent> {
            let deadline = Instant::now() + TIMEOUT;
            while self.events.lock().unwrap().len() < count && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }
            self.take_events()
        }
    }

    impl RenderPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn config(workers: usize, tile_size: u32) -> RenderConfig {
        RenderConfig {
            worker_count: workers,
            tile_size,
            ..RenderConfig::default()
        }
    }

    fn create_engine(workers: usize, tile_size: u32) -> (RenderEngine, Arc<MockPresenterPort>) {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let engine = RenderEngine::new(
            &config(workers, tile_size),
            Arc::clone(&presenter_port) as Arc<dyn RenderPresenterPort>,
        )
        .unwrap();

        (engine, presenter_port)
    }

    fn viewport(center: Complex, scale: f64, width: u32, height: u32, max: u32) -> Viewport {
        Viewport::new(center, scale, width, height, max).unwrap()
    }

    fn reference_render(viewport: &Viewport, palette: &Palette) -> PixelBuffer {
        TileScheduler::new(NonZeroUsize::MIN, NonZeroU32::new(64).unwrap())
            .unwrap()
            .render_all(viewport, &MandelbrotAlgorithm, palette)
    }

    #[test_log::test]
    fn test_render_completes_and_matches_reference() {
        let (engine, presenter_port) = create_engine(4, 16);
        let view = viewport(Complex::new(-0.5, 0.0), 0.01, 90, 70, 60);

        let generation = engine.render(view);

        assert!(engine.wait_for_generation(generation, TIMEOUT));
        assert_eq!(engine.last_completed_generation(), generation);
        assert_eq!(engine.snapshot(), reference_render(&view, &engine.palette()));

        let events = presenter_port.wait_for_events(6 * 5 + 1);
        let regions = events
            .iter()
            .filter(|e| matches!(e, RenderEvent::RegionUpdated { .. }))
            .count();
        let completions: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Completed { .. }))
            .collect();

        assert_eq!(regions, 6 * 5);
        assert_eq!(completions.len(), 1);
        assert!(events.iter().all(|e| e.generation() == generation));
    }

    #[test]
    fn test_single_worker_reports_completion_after_every_region() {
        let (engine, presenter_port) = create_engine(1, 16);
        let view = viewport(Complex::new(-0.5, 0.0), 0.02, 48, 32, 40);

        let generation = engine.render(view);
        assert!(engine.wait_for_generation(generation, TIMEOUT));

        let events = presenter_port.wait_for_events(3 * 2 + 1);
        let (last, regions) = events.split_last().unwrap();

        assert!(matches!(last, RenderEvent::Completed { generation: g, .. } if *g == generation));
        assert_eq!(regions.len(), 3 * 2);
        assert!(
            regions
                .iter()
                .all(|e| matches!(e, RenderEvent::RegionUpdated { .. }))
        );
    }

    #[test]
    fn test_center_of_classic_view_is_in_set() {
        let (engine, _) = create_engine(4, 64);
        let view = viewport(Complex::new(-0.5, 0.0), 0.005, 400, 300, 100);

        let generation = engine.render(view);
        assert!(engine.wait_for_generation(generation, TIMEOUT));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.width(), 400);
        assert_eq!(snapshot.height(), 300);
        assert_eq!(snapshot.buffer_size(), 400 * 300 * 3);
        assert_eq!(snapshot.pixel(Point { x: 200, y: 150 }), Some(Colour::BLACK));
    }

    #[test]
    fn test_classic_region_renders_through_engine() {
        let (engine, _) = create_engine(4, 32);
        let region =
            crate::ComplexRect::new(Complex::new(-2.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        let view = Viewport::from_region(region, 300, 100).unwrap();

        assert_eq!((view.width(), view.height()), (300, 200));

        let generation = engine.render(view);
        assert!(engine.wait_for_generation(generation, TIMEOUT));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.pixel(Point { x: 150, y: 100 }), Some(Colour::BLACK));
        assert_ne!(snapshot.pixel(Point { x: 0, y: 0 }), Some(Colour::BLACK));
        assert_eq!(snapshot, reference_render(&view, &engine.palette()));
    }

    #[test]
    fn test_far_outside_view_has_no_in_set_pixels() {
        let (engine, _) = create_engine(2, 8);
        let view = viewport(Complex::new(2.0, 2.0), 0.001, 16, 16, 10);

        let generation = engine.render(view);
        assert!(engine.wait_for_generation(generation, TIMEOUT));

        let snapshot = engine.snapshot();
        for y in 0..16 {
            for x in 0..16 {
                assert_ne!(snapshot.pixel(Point { x, y }), Some(Colour::BLACK));
            }
        }
    }

    #[test]
    fn test_same_viewport_twice_gives_identical_buffers() {
        let (engine, _) = create_engine(3, 16);
        let view = viewport(Complex::new(-0.75, 0.1), 0.002, 64, 48, 200);

        let first = engine.render(view);
        assert!(engine.wait_for_generation(first, TIMEOUT));
        let first_snapshot = engine.snapshot();

        let second = engine.render(view);
        assert!(engine.wait_for_generation(second, TIMEOUT));

        assert!(second > first);
        assert_eq!(engine.snapshot(), first_snapshot);
    }

    #[test_log::test]
    fn test_superseded_generation_never_reaches_final_buffer() {
        let (engine, _) = create_engine(1, 8);
        // Deep inside the set, so every pixel runs the full iteration budget.
        let slow = viewport(Complex::new(-0.1, 0.0), 0.0001, 64, 48, 20_000);
        let fast = viewport(Complex::new(3.0, 3.0), 0.01, 64, 48, 50);

        let stale = engine.render(slow);
        let current = engine.render(fast);

        assert!(current > stale);
        assert!(engine.wait_for_generation(current, TIMEOUT));
        assert_eq!(engine.snapshot(), reference_render(&fast, &engine.palette()));

        let total_tiles = 2 * 8 * 6;
        let deadline = Instant::now() + TIMEOUT;
        loop {
            let stats = engine.stats();
            if stats.tiles_applied + stats.tiles_discarded == total_tiles {
                assert!(stats.tiles_applied >= 48);
                assert!(stats.tiles_discarded >= 1);
                break;
            }
            assert!(Instant::now() < deadline, "tiles never settled: {:?}", stats);
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(engine.snapshot(), reference_render(&fast, &engine.palette()));
        assert_eq!(engine.last_completed_generation(), current);
    }

    #[test]
    fn test_waiting_on_superseded_generation_succeeds_once_newer_completes() {
        let (engine, _) = create_engine(2, 16);
        let view = viewport(Complex::new(-0.5, 0.0), 0.01, 32, 32, 20);

        let older = engine.render(view);
        let newer = engine.render(view.pan(4.0, 0.0).unwrap());

        assert!(engine.wait_for_generation(newer, TIMEOUT));
        assert!(engine.wait_for_generation(older, Duration::ZERO));
    }

    #[test]
    fn test_wait_times_out_for_generation_never_requested() {
        let (engine, _) = create_engine(1, 16);

        assert!(!engine.wait_for_generation(Generation::new(5), Duration::from_millis(20)));
        assert_eq!(engine.last_completed_generation(), Generation::NONE);
    }

    #[test]
    fn test_resize_reallocates_buffer() {
        let (engine, _) = create_engine(2, 32);
        let view = viewport(Complex::new(-0.5, 0.0), 0.01, 40, 30, 30);

        let first = engine.render(view);
        assert!(engine.wait_for_generation(first, TIMEOUT));

        let resized = view.resize(100, 20).unwrap();
        let second = engine.render(resized);

        assert_eq!(engine.current_viewport(), resized);
        assert!(engine.wait_for_generation(second, TIMEOUT));

        let snapshot = engine.snapshot();
        assert_eq!((snapshot.width(), snapshot.height()), (100, 20));
        assert_eq!(snapshot, reference_render(&resized, &engine.palette()));
    }

    #[test]
    fn test_generation_ids_increment() {
        let (engine, _) = create_engine(1, 64);
        let view = viewport(Complex::ZERO, 0.1, 8, 8, 10);

        assert_eq!(engine.current_generation(), Generation::NONE);

        let a = engine.render(view);
        let b = engine.render(view);
        let c = engine.render(view);

        assert_eq!(a, Generation::new(1));
        assert_eq!(b, Generation::new(2));
        assert_eq!(c, Generation::new(3));
        assert_eq!(engine.current_generation(), c);
    }

    #[test]
    fn test_snapshot_before_first_render_is_black_at_configured_size() {
        let (engine, _) = create_engine(1, 64);
        let expected = RenderConfig::default().validate().unwrap().viewport;

        let snapshot = engine.snapshot();

        assert_eq!(engine.current_viewport(), expected);
        assert_eq!(snapshot.width(), expected.width());
        assert!(snapshot.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let presenter_port: Arc<dyn RenderPresenterPort> = Arc::new(MockPresenterPort::default());
        let bad = RenderConfig {
            palette_name: "nope".to_string(),
            ..RenderConfig::default()
        };

        let result = RenderEngine::new(&bad, presenter_port);

        assert!(matches!(result, Err(RenderEngineError::Config(_))));
    }

    #[derive(Debug)]
    struct StripesAlgorithm;

    impl FractalAlgorithm for StripesAlgorithm {
        fn compute(&self, _: &Viewport, pixel: Point) -> EscapeResult {
            if pixel.x % 2 == 0 {
                EscapeResult::bounded(10, 0.0)
            } else {
                EscapeResult::escaped(10, 16.0)
            }
        }

        fn display_name(&self) -> &str {
            "Stripes"
        }
    }

    #[test]
    fn test_engine_accepts_other_algorithms() {
        let presenter_port: Arc<dyn RenderPresenterPort> = Arc::new(MockPresenterPort::default());
        let config = RenderConfig {
            palette_name: "grayscale".to_string(),
            smooth: false,
            ..config(2, 4)
        };
        let engine = RenderEngine::with_algorithm(&config, StripesAlgorithm, presenter_port).unwrap();
        let view = viewport(Complex::ZERO, 0.1, 6, 3, 10);

        let generation = engine.render(view);
        assert!(engine.wait_for_generation(generation, TIMEOUT));

        let snapshot = engine.snapshot();
        let white = PaletteKind::Grayscale.colour_at(1.0);
        assert_eq!(snapshot.pixel(Point { x: 0, y: 2 }), Some(Colour::BLACK));
        assert_eq!(snapshot.pixel(Point { x: 1, y: 2 }), Some(white));
        assert_eq!(
            engine.stats(),
            RenderStats {
                tiles_applied: 2,
                tiles_discarded: 0
            }
        );
    }
}
