pub mod algorithm;
pub mod colour_map;
pub mod errors;
pub mod evaluate;
pub mod params;

pub use evaluate::{evaluate, evaluate_cancelable};
pub use params::MandelbrotParams;
