use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, error, info, warn};

use crate::controllers::interactive::coalescer::{Batch, EventCoalescer, EventReceiver, StopSignal};
use crate::controllers::interactive::data::frame_data::GeneratedFrame;
use crate::controllers::interactive::handoff::{HandoffCloser, HandoffSender};
use crate::controllers::interactive::view_state::{ViewParameters, ViewState};
use crate::core::actions::cancellation::{CancelToken, Cancelled, StopToken};
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::evaluate_cancelable;

const THREAD_NAME: &str = "mandel-generator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting for input events.
    Idle,
    Computing,
    /// Blocked until the render loop takes the finished frame.
    Publishing,
    Stopped,
}

impl WorkerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Computing,
            2 => Self::Publishing,
            _ => Self::Stopped,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Computing => 1,
            Self::Publishing => 2,
            Self::Stopped => 3,
        }
    }
}

#[derive(Debug)]
struct WorkerStatus {
    state: AtomicU8,
    published_generations: AtomicU64,
}

impl WorkerStatus {
    fn set(&self, state: WorkerState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }
}

enum Regeneration {
    Published,
    /// The image would be empty; the view stays dirty until the bounds grow.
    Skipped,
    Stopped,
}

/// The long-lived task that owns the view state, folds input events into it
/// and publishes a fresh image whenever it changes.
pub struct GenerationWorker {
    view: ViewState,
    coalescer: EventCoalescer,
    frames: HandoffSender<GeneratedFrame>,
    status: Arc<WorkerStatus>,
    stop_token: StopToken,
    generation: u64,
}

impl GenerationWorker {
    #[must_use]
    pub fn new(
        initial: ViewParameters,
        events: EventReceiver,
        frames: HandoffSender<GeneratedFrame>,
    ) -> Self {
        Self {
            view: ViewState::new(initial),
            coalescer: EventCoalescer::new(events),
            frames,
            status: Arc::new(WorkerStatus {
                state: AtomicU8::new(WorkerState::Computing.as_u8()),
                published_generations: AtomicU64::new(0),
            }),
            stop_token: StopToken::new(),
            generation: 0,
        }
    }

    /// Starts the worker on its own thread. `stop_signal` must wake the queue
    /// the worker reads events from.
    pub fn spawn(self, stop_signal: StopSignal) -> io::Result<WorkerHandle> {
        let status = Arc::clone(&self.status);
        let stop_token = self.stop_token.clone();
        let closer = self.frames.closer();

        let thread = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || self.run())?;

        Ok(WorkerHandle {
            status,
            stop_token,
            stop_signal,
            closer,
            thread: Some(thread),
        })
    }

    fn run(mut self) {
        info!("Generator started");

        // The first image is produced before any event is read.
        if let Regeneration::Stopped = self.regenerate() {
            self.status.set(WorkerState::Stopped);
            return;
        }

        loop {
            self.status.set(WorkerState::Idle);

            if let Batch::Stopped = self.coalescer.next_batch(&mut self.view) {
                break;
            }

            if self.stop_token.is_cancelled() {
                break;
            }

            if !self.view.take_dirty() {
                continue;
            }

            if let Regeneration::Stopped = self.regenerate() {
                break;
            }
        }

        self.status.set(WorkerState::Stopped);
        info!("Generator stopped after {} frames", self.generation);
    }

    fn regenerate(&mut self) -> Regeneration {
        self.status.set(WorkerState::Computing);

        let view = *self.view.params();
        let params = match view.mandelbrot_params() {
            Ok(params) => params,
            Err(MandelbrotError::EmptyImage { width, height }) => {
                debug!("Skipping generation of empty {}x{} image", width, height);
                self.view.mark_dirty();
                return Regeneration::Skipped;
            }
            Err(err) => {
                warn!("Skipping generation: {}", err);
                return Regeneration::Skipped;
            }
        };

        let start = Instant::now();
        let pixel_buffer = match evaluate_cancelable(&params, &self.stop_token) {
            Ok(pixel_buffer) => pixel_buffer,
            Err(Cancelled) => return Regeneration::Stopped,
        };
        let render_duration = start.elapsed();

        self.generation += 1;
        debug!(
            "Generated frame {} ({}x{}) in {:?}",
            self.generation,
            pixel_buffer.width(),
            pixel_buffer.height(),
            render_duration
        );

        self.status.set(WorkerState::Publishing);

        let frame = GeneratedFrame {
            generation: self.generation,
            pixel_buffer,
            view,
            render_duration,
        };

        if self.frames.send(frame).is_err() {
            return Regeneration::Stopped;
        }

        self.status
            .published_generations
            .fetch_add(1, Ordering::AcqRel);

        Regeneration::Published
    }
}

/// Owner's side of a running [`GenerationWorker`]. Dropping it stops the
/// worker and joins its thread.
#[derive(Debug)]
pub struct WorkerHandle {
    status: Arc<WorkerStatus>,
    stop_token: StopToken,
    stop_signal: StopSignal,
    closer: HandoffCloser<GeneratedFrame>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    #[must_use]
    pub fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.status.state.load(Ordering::Acquire))
    }

    /// Frames the render loop has taken from the worker.
    #[must_use]
    pub fn published_generations(&self) -> u64 {
        self.status.published_generations.load(Ordering::Acquire)
    }

    /// Interrupts any evaluation, wait, or publish in progress and joins the
    /// worker thread.
    pub fn stop(&mut self) {
        self.stop_token.stop();
        self.stop_signal.raise();
        self.closer.close();

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Generator thread panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::controllers::interactive::coalescer::{EventSender, event_channel};
    use crate::controllers::interactive::events::input::InputEvent;
    use crate::controllers::interactive::handoff::{HandoffReceiver, RecvTimeoutError, handoff};
    use crate::controllers::interactive::view_state::ZOOM_STEP;
    use crate::core::data::pixel_rect::PixelRect;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(10);
    const QUIET: Duration = Duration::from_millis(200);

    struct Harness {
        events: EventSender,
        frames: HandoffReceiver<GeneratedFrame>,
        handle: WorkerHandle,
    }

    fn start(bounds: PixelRect, queued: &[InputEvent]) -> Harness {
        let view = ViewParameters::initial(&ViewConfig::default(), bounds);
        let (events, receiver) = event_channel(16);
        let (frames_tx, frames) = handoff();

        for event in queued {
            events.send(*event).unwrap();
        }

        let handle = GenerationWorker::new(view, receiver, frames_tx)
            .spawn(events.stop_signal())
            .unwrap();

        Harness {
            events,
            frames,
            handle,
        }
    }

    fn wait_for_state(handle: &WorkerHandle, state: WorkerState) {
        let deadline = Instant::now() + WAIT;
        while handle.state() != state {
            assert!(Instant::now() < deadline, "worker never reached {state:?}");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test_log::test]
    fn test_initial_frame_uses_default_view() {
        let mut harness = start(PixelRect::from_size(900, 900), &[]);

        let frame = harness.frames.recv_timeout(WAIT).unwrap();

        assert_eq!(frame.generation, 1);
        assert_eq!(frame.view.zoom, 1.0);
        assert_eq!(frame.pixel_buffer.width(), 112);
        assert_eq!(frame.pixel_buffer.height(), 112);

        wait_for_state(&harness.handle, WorkerState::Idle);
        harness.handle.stop();
        assert_eq!(harness.handle.state(), WorkerState::Stopped);
    }

    #[test_log::test]
    fn test_queued_burst_produces_one_regeneration() {
        let mut harness = start(
            PixelRect::from_size(900, 900),
            &[
                InputEvent::ZoomDelta(1.0),
                InputEvent::PanDelta { dx: 10.0, dy: 10.0 },
            ],
        );

        let first = harness.frames.recv_timeout(WAIT).unwrap();
        let second = harness.frames.recv_timeout(WAIT).unwrap();

        assert_eq!(first.generation, 1);
        assert_eq!(first.view.zoom, 1.0);

        let zoom = 1.0 + ZOOM_STEP;
        assert_eq!(second.generation, 2);
        assert_eq!(second.view.zoom, zoom);
        assert_eq!(second.view.center_x, -0.5 + (10.0 / 900.0) / zoom);
        assert_eq!(second.view.center_y, (10.0 / 900.0) / zoom);

        assert_eq!(
            harness.frames.recv_timeout(QUIET).unwrap_err(),
            RecvTimeoutError::Timeout
        );
        assert_eq!(harness.handle.published_generations(), 2);

        harness.handle.stop();
    }

    #[test_log::test]
    fn test_resize_alone_does_not_regenerate() {
        let mut harness = start(PixelRect::from_size(400, 400), &[]);
        harness.frames.recv_timeout(WAIT).unwrap();

        harness
            .events
            .send(InputEvent::Resize {
                width: 800,
                height: 400,
            })
            .unwrap();
        assert_eq!(
            harness.frames.recv_timeout(QUIET).unwrap_err(),
            RecvTimeoutError::Timeout
        );

        harness.events.send(InputEvent::ResolutionToggle).unwrap();
        let frame = harness.frames.recv_timeout(WAIT).unwrap();

        // divisor 8 -> 4 over the new 800x400 bounds
        assert_eq!(frame.generation, 2);
        assert_eq!(frame.pixel_buffer.width(), 200);
        assert_eq!(frame.pixel_buffer.height(), 100);

        harness.handle.stop();
    }

    #[test_log::test]
    fn test_empty_bounds_wait_for_a_usable_size() {
        let mut harness = start(PixelRect::from_size(4, 4), &[]);

        assert_eq!(
            harness.frames.recv_timeout(QUIET).unwrap_err(),
            RecvTimeoutError::Timeout
        );

        harness
            .events
            .send(InputEvent::Resize {
                width: 80,
                height: 40,
            })
            .unwrap();
        let frame = harness.frames.recv_timeout(WAIT).unwrap();

        assert_eq!(frame.generation, 1);
        assert_eq!(frame.pixel_buffer.width(), 10);
        assert_eq!(frame.pixel_buffer.height(), 5);

        harness.handle.stop();
    }

    #[test_log::test]
    fn test_generations_strictly_increase() {
        let mut harness = start(PixelRect::from_size(160, 160), &[]);
        let mut last = harness.frames.recv_timeout(WAIT).unwrap().generation;

        for _ in 0..5 {
            harness.events.send(InputEvent::ZoomDelta(1.0)).unwrap();
            let frame = harness.frames.recv_timeout(WAIT).unwrap();

            assert!(frame.generation > last);
            last = frame.generation;
        }

        harness.handle.stop();
    }

    #[test_log::test]
    fn test_stop_releases_a_worker_blocked_on_publish() {
        let mut harness = start(PixelRect::from_size(900, 900), &[]);

        wait_for_state(&harness.handle, WorkerState::Publishing);
        harness.handle.stop();

        assert_eq!(harness.handle.state(), WorkerState::Stopped);
        assert_eq!(harness.handle.published_generations(), 0);
    }
}
