use std::thread;

use log::warn;

use crate::adapters::pixel_format::{copy_rgb_to_rgba, copy_rgba_to_rgb};
use crate::controllers::render_loop::ports::device::DownloadCompletion;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;

const THREAD_NAME: &str = "texture-download";
const BYTES_PER_RGBA_PIXEL: usize = 4;

/// Texture contents as held by a device: tightly packed RGBA rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaFrame {
    #[must_use]
    pub fn from_pixel_buffer(pixel_buffer: &PixelBuffer) -> Self {
        let mut data = vec![0; pixel_buffer.buffer().len() / 3 * BYTES_PER_RGBA_PIXEL];
        copy_rgb_to_rgba(pixel_buffer.buffer(), &mut data);

        Self {
            width: pixel_buffer.width(),
            height: pixel_buffer.height(),
            data,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copies `region` out as an RGB image. `None` if the region is empty or
    /// not fully inside the frame.
    #[must_use]
    pub fn read_region(&self, region: PixelRect) -> Option<PixelBuffer> {
        if region.is_empty() || region.top_left().x < 0 || region.top_left().y < 0 {
            return None;
        }

        let left = region.top_left().x as usize;
        let top = region.top_left().y as usize;
        let width = region.width() as usize;
        let height = region.height() as usize;

        if left + width > self.width as usize || top + height > self.height as usize {
            return None;
        }

        let stride = self.width as usize * BYTES_PER_RGBA_PIXEL;
        let mut rgb = vec![0; width * height * 3];

        for (row, dst) in rgb.chunks_exact_mut(width * 3).enumerate() {
            let start = (top + row) * stride + left * BYTES_PER_RGBA_PIXEL;
            let src = &self.data[start..start + width * BYTES_PER_RGBA_PIXEL];
            copy_rgba_to_rgb(src, dst);
        }

        PixelBuffer::from_data(PixelRect::from_size(region.width(), region.height()), rgb).ok()
    }
}

/// Reads `region` of `frame` back on a background thread.
///
/// If the thread cannot be started the completion reports a disconnected
/// download.
#[must_use]
pub fn spawn_readback(frame: Option<RgbaFrame>, region: PixelRect) -> DownloadCompletion {
    let (sender, completion) = DownloadCompletion::channel();

    let spawned = thread::Builder::new()
        .name(THREAD_NAME.to_string())
        .spawn(move || {
            let image = frame.and_then(|frame| frame.read_region(region));
            sender.complete(image);
        });

    if let Err(err) = spawned {
        warn!("Failed to start texture download: {}", err);
    }

    completion
}
