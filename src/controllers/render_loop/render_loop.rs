use std::error::Error;
use std::fmt;
use std::io;
use std::time::Duration;

use log::{debug, info};

use crate::config::ExportConfig;
use crate::controllers::export::pipeline::{ExportTask, export_current_image};
use crate::controllers::interactive::data::frame_data::GeneratedFrame;
use crate::controllers::interactive::handoff::{HandoffReceiver, RecvTimeoutError, TryRecvError};
use crate::controllers::render_loop::ports::device::Device;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;

/// The image currently shown on the device.
#[derive(Debug)]
pub struct DisplayedTexture {
    pub source: PixelBuffer,
    pub generation: u64,
    /// Whether `source` has been uploaded to the device yet.
    pub loaded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Generation of a frame taken from the generator this tick, if any.
    pub received: Option<u64>,
    pub uploaded: bool,
}

#[derive(Debug)]
pub enum RenderLoopError<E> {
    Device(E),
    /// The generator closed its end of the handoff.
    GeneratorExited,
}

impl<E: fmt::Display> fmt::Display for RenderLoopError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(err) => write!(f, "device error: {}", err),
            Self::GeneratorExited => write!(f, "generator exited"),
        }
    }
}

impl<E: Error + 'static> Error for RenderLoopError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Device(err) => Some(err),
            Self::GeneratorExited => None,
        }
    }
}

pub struct RenderLoop<D: Device> {
    device: D,
    frames: HandoffReceiver<GeneratedFrame>,
    texture: Option<DisplayedTexture>,
    /// Bounds of the texture the device currently holds.
    uploaded_region: Option<PixelRect>,
    cursor_grabbed: bool,
    export_config: ExportConfig,
}

impl<D: Device> RenderLoop<D> {
    #[must_use]
    pub fn new(
        device: D,
        frames: HandoffReceiver<GeneratedFrame>,
        export_config: ExportConfig,
    ) -> Self {
        Self {
            device,
            frames,
            texture: None,
            uploaded_region: None,
            cursor_grabbed: false,
            export_config,
        }
    }

    /// Runs one tick: takes a new frame if the generator has one waiting,
    /// uploads the texture if it changed, and renders.
    ///
    /// Never waits on the generator.
    pub fn frame(&mut self) -> Result<FrameReport, RenderLoopError<D::Error>> {
        let mut report = FrameReport::default();

        match self.frames.try_recv() {
            Ok(frame) => report.received = Some(self.display(frame)),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => return Err(RenderLoopError::GeneratorExited),
        }

        report.uploaded = self.upload_pending()?;

        self.device.render().map_err(RenderLoopError::Device)?;

        Ok(report)
    }

    /// Blocks for up to `timeout` until the generator publishes a frame,
    /// then makes it the displayed texture and uploads it. Returns its
    /// generation, or `None` on timeout.
    pub fn wait_for_frame(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<u64>, RenderLoopError<D::Error>> {
        let generation = match self.frames.recv_timeout(timeout) {
            Ok(frame) => self.display(frame),
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Closed) => return Err(RenderLoopError::GeneratorExited),
        };

        self.upload_pending()?;

        Ok(Some(generation))
    }

    fn upload_pending(&mut self) -> Result<bool, RenderLoopError<D::Error>> {
        let Some(texture) = self.texture.as_mut() else {
            return Ok(false);
        };

        if texture.loaded {
            return Ok(false);
        }

        self.device
            .upload(&texture.source)
            .map_err(RenderLoopError::Device)?;
        texture.loaded = true;
        self.uploaded_region = Some(texture.source.pixel_rect());

        Ok(true)
    }

    fn display(&mut self, frame: GeneratedFrame) -> u64 {
        debug!(
            "Displaying frame {} ({}x{}, rendered in {:?})",
            frame.generation,
            frame.pixel_buffer.width(),
            frame.pixel_buffer.height(),
            frame.render_duration
        );

        self.texture = Some(DisplayedTexture {
            source: frame.pixel_buffer,
            generation: frame.generation,
            loaded: false,
        });

        frame.generation
    }

    /// Downloads the texture the device holds and saves it in the
    /// background.
    pub fn request_export(&self) -> io::Result<ExportTask> {
        info!("Writing texture to {}", self.export_config.path.display());

        let region = self.uploaded_region.unwrap_or(PixelRect::from_size(0, 0));

        export_current_image(self.device.download(region), &self.export_config)
    }

    /// Flips pointer capture on the device.
    pub fn toggle_display(&mut self) -> Result<bool, RenderLoopError<D::Error>> {
        let grabbed = !self.cursor_grabbed;

        self.device
            .set_cursor_grabbed(grabbed)
            .map_err(RenderLoopError::Device)?;
        self.cursor_grabbed = grabbed;
        debug!("Cursor grabbed: {}", grabbed);

        Ok(grabbed)
    }

    #[must_use]
    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    #[must_use]
    pub fn texture(&self) -> Option<&DisplayedTexture> {
        self.texture.as_ref()
    }

    #[must_use]
    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
