//! Helpers shared by the device adapters.

pub mod pixel_format;
pub mod readback;
