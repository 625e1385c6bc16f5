use std::time::Duration;

use crate::controllers::interactive::view_state::ViewParameters;
use crate::core::data::pixel_buffer::PixelBuffer;

/// One completed evaluation, handed from the generator to the render loop.
#[derive(Debug)]
pub struct GeneratedFrame {
    /// Strictly increasing per generator, starting at 1.
    pub generation: u64,
    pub pixel_buffer: PixelBuffer,
    /// The parameters the image was computed from.
    pub view: ViewParameters,
    pub render_duration: Duration,
}
