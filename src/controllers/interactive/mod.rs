//! The generator side of the explorer.
//!
//! A single worker thread owns the [`ViewState`](view_state::ViewState). It
//! drains input events in batches through the [`coalescer`], regenerates the
//! image when the view changed, and passes each finished frame to the render
//! loop through a rendezvous [`handoff`].

pub mod coalescer;
pub mod data;
pub mod events;
pub mod handoff;
pub mod view_state;
pub mod worker;

pub use coalescer::{EventSendError, EventSender, event_channel};
pub use data::frame_data::GeneratedFrame;
pub use events::input::InputEvent;
pub use view_state::{ViewParameters, ViewState};
pub use worker::{GenerationWorker, WorkerHandle, WorkerState};
