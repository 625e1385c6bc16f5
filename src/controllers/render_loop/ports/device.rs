use std::error::Error;
use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;

use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;

/// The graphics device the render loop draws through.
///
/// Implementations own a single texture holding the most recently uploaded
/// image and stretch it over the whole output surface on every render.
pub trait Device {
    type Error: Error + Send + Sync + 'static;

    /// Size of the output surface in pixels.
    fn bounds(&self) -> PixelRect;

    /// Replaces the displayed texture with `pixel_buffer`.
    fn upload(&mut self, pixel_buffer: &PixelBuffer) -> Result<(), Self::Error>;

    /// Presents one frame.
    fn render(&mut self) -> Result<(), Self::Error>;

    /// Starts reading `region` of the texture back to the CPU. The result
    /// arrives on the returned completion, possibly from another thread;
    /// `None` means the device had nothing to return.
    fn download(&self, region: PixelRect) -> DownloadCompletion;

    fn set_cursor_grabbed(&mut self, grabbed: bool) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadWaitError {
    /// The device dropped the download without completing it.
    Disconnected,
    TimedOut,
}

impl fmt::Display for DownloadWaitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "device abandoned the download"),
            Self::TimedOut => write!(f, "timed out waiting for the download"),
        }
    }
}

impl Error for DownloadWaitError {}

/// Device side of a pending download.
#[derive(Debug)]
pub struct DownloadSender {
    tx: SyncSender<Option<PixelBuffer>>,
}

impl DownloadSender {
    pub fn complete(self, image: Option<PixelBuffer>) {
        // The waiting side may already have given up.
        let _ = self.tx.send(image);
    }
}

/// Single-use completion signal for [`Device::download`].
#[derive(Debug)]
pub struct DownloadCompletion {
    rx: Receiver<Option<PixelBuffer>>,
}

impl DownloadCompletion {
    #[must_use]
    pub fn channel() -> (DownloadSender, Self) {
        let (tx, rx) = mpsc::sync_channel(1);

        (DownloadSender { tx }, Self { rx })
    }

    /// A completion that is already resolved with `image`.
    #[must_use]
    pub fn ready(image: Option<PixelBuffer>) -> Self {
        let (sender, completion) = Self::channel();
        sender.complete(image);
        completion
    }

    /// Blocks until the device completes the download, or for at most
    /// `timeout` when one is given.
    pub fn wait(self, timeout: Option<Duration>) -> Result<Option<PixelBuffer>, DownloadWaitError> {
        match timeout {
            None => self.rx.recv().map_err(|_| DownloadWaitError::Disconnected),
            Some(timeout) => self.rx.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => DownloadWaitError::TimedOut,
                RecvTimeoutError::Disconnected => DownloadWaitError::Disconnected,
            }),
        }
    }
}
