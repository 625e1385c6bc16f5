//! [`Device`](crate::controllers::render_loop::ports::device::Device)
//! adapters.

#[cfg(feature = "gui")]
pub mod pixels;
pub mod software;
