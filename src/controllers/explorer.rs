use std::error::Error;
use std::fmt;
use std::io;

use log::{error, info, warn};

use crate::config::{ConfigError, ExplorerConfig};
use crate::controllers::export::pipeline::ExportTask;
use crate::controllers::interactive::coalescer::{EventSendError, EventSender, event_channel};
use crate::controllers::interactive::events::input::InputEvent;
use crate::controllers::interactive::handoff::handoff;
use crate::controllers::interactive::view_state::ViewParameters;
use crate::controllers::interactive::worker::{GenerationWorker, WorkerHandle};
use crate::controllers::render_loop::ports::device::Device;
use crate::controllers::render_loop::render_loop::{FrameReport, RenderLoop, RenderLoopError};

#[derive(Debug)]
pub enum ExplorerError {
    Config(ConfigError),
    SpawnGenerator(io::Error),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{}", err),
            Self::SpawnGenerator(err) => write!(f, "failed to start generator: {}", err),
        }
    }
}

impl From<ConfigError> for ExplorerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl Error for ExplorerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::SpawnGenerator(err) => Some(err),
        }
    }
}

/// Wires the generator, the render loop and input routing together.
///
/// View events go to the generator through the bounded queue; export and
/// display commands are handled on the calling (render) thread.
pub struct Explorer<D: Device> {
    render_loop: RenderLoop<D>,
    events: EventSender,
    worker: WorkerHandle,
}

impl<D: Device> Explorer<D> {
    pub fn start(config: &ExplorerConfig, device: D) -> Result<Self, ExplorerError> {
        config.validate()?;

        let bounds = device.bounds();
        let view = ViewParameters::initial(&config.view, bounds);
        let (events, receiver) = event_channel(config.event_queue_capacity);
        let (frames_tx, frames_rx) = handoff();

        let worker = GenerationWorker::new(view, receiver, frames_tx)
            .spawn(events.stop_signal())
            .map_err(ExplorerError::SpawnGenerator)?;

        info!(
            "Explorer started at {}x{} (resolution divisor {}, {} iterations)",
            bounds.width(),
            bounds.height(),
            view.resolution_divisor,
            view.max_iterations
        );

        Ok(Self {
            render_loop: RenderLoop::new(device, frames_rx, config.export.clone()),
            events,
            worker,
        })
    }

    /// Routes one input event. Returns the export task when the event started
    /// one.
    pub fn dispatch(&mut self, event: InputEvent) -> Option<ExportTask> {
        match event {
            InputEvent::ExportRequested => match self.render_loop.request_export() {
                Ok(task) => Some(task),
                Err(err) => {
                    error!("Failed to start export: {}", err);
                    None
                }
            },
            InputEvent::DisplayToggle => {
                if let Err(err) = self.render_loop.toggle_display() {
                    warn!("Failed to toggle display: {}", err);
                }
                None
            }
            _ if event.affects_view() => {
                match self.events.try_send(event) {
                    Ok(()) => {}
                    Err(EventSendError::Full) => warn!("Event queue full, dropping {:?}", event),
                    Err(EventSendError::Disconnected) => {
                        warn!("Generator gone, dropping {:?}", event);
                    }
                }
                None
            }
            _ => None,
        }
    }

    pub fn frame(&mut self) -> Result<FrameReport, RenderLoopError<D::Error>> {
        self.render_loop.frame()
    }

    #[must_use]
    pub fn render_loop(&self) -> &RenderLoop<D> {
        &self.render_loop
    }

    pub fn render_loop_mut(&mut self) -> &mut RenderLoop<D> {
        &mut self.render_loop
    }

    #[must_use]
    pub fn worker(&self) -> &WorkerHandle {
        &self.worker
    }

    /// Stops the generator and hands back the render loop with its device.
    pub fn shutdown(mut self) -> RenderLoop<D> {
        self.worker.stop();
        info!(
            "Explorer stopped after {} frames",
            self.worker.published_generations()
        );

        self.render_loop
    }
}
