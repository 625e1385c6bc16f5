//! Interactive Mandelbrot explorer.
//!
//! A generator thread recomputes the image whenever the view changes and hands
//! each finished frame to the render loop, which shows the latest one without
//! ever waiting on the generator. The displayed image can be exported to PNG
//! in the background.

pub mod adapters;
pub mod config;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod presenters;
pub mod storage;

pub use config::{ExplorerConfig, ExportConfig, ViewConfig, WindowConfig};
pub use controllers::explorer::{Explorer, ExplorerError};
pub use controllers::export::{ExportOutcome, ExportTask};
pub use controllers::interactive::InputEvent;
pub use crate::core::fractals::mandelbrot::{MandelbrotParams, evaluate};
#[cfg(feature = "gui")]
pub use input::gui::run_gui;
pub use presenters::software::device::SoftwareDevice;
