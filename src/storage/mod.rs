//! Durable storage for exported images.

pub mod write_png;
