//! Input adapters that turn platform events into explorer input events.

pub mod gui;
