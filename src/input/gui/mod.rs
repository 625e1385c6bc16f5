//! Windowed front end: winit for the window and input, pixels for drawing.

mod app;
pub mod events;

pub use app::run_gui;
