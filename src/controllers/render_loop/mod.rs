//! Main-thread consumer of generated frames.
//!
//! The render loop owns the graphics [`Device`](ports::device::Device) and the
//! texture currently shown on it. It never blocks on the generator.

pub mod ports;
#[allow(clippy::module_inception)]
pub mod render_loop;

pub use ports::device::{Device, DownloadCompletion, DownloadSender, DownloadWaitError};
pub use render_loop::{DisplayedTexture, FrameReport, RenderLoop, RenderLoopError};
