//! Application layer: the generator, the render loop, the export pipeline and
//! the [`Explorer`](explorer::Explorer) that ties them together.

pub mod explorer;
pub mod export;
pub mod interactive;
pub mod render_loop;
