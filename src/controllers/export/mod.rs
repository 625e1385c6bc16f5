//! Fire-and-forget export of the displayed image.

pub mod detached;
pub mod pipeline;

pub use detached::DetachedTask;
pub use pipeline::{ExportError, ExportOutcome, ExportTask, export_current_image};
