use std::convert::Infallible;

use crate::adapters::readback::{RgbaFrame, spawn_readback};
use crate::controllers::render_loop::ports::device::{Device, DownloadCompletion};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;

const PLACEHOLDER_RGBA: [u8; 4] = [0, 0, 0, 255];

/// In-memory device. Renders by stretching the texture over an RGBA
/// framebuffer with nearest-neighbour sampling.
#[derive(Debug)]
pub struct SoftwareDevice {
    bounds: PixelRect,
    framebuffer: Vec<u8>,
    texture: Option<RgbaFrame>,
    cursor_grabbed: bool,
    frames_rendered: u64,
    uploads: u64,
}

impl SoftwareDevice {
    #[must_use]
    pub fn new(bounds: PixelRect) -> Self {
        Self {
            bounds,
            framebuffer: vec![0; bounds.size() as usize * 4],
            texture: None,
            cursor_grabbed: false,
            frames_rendered: 0,
            uploads: 0,
        }
    }

    /// Changes the output surface size. The next render redraws at the new
    /// size.
    pub fn resize(&mut self, bounds: PixelRect) {
        self.bounds = bounds;
        self.framebuffer = vec![0; bounds.size() as usize * 4];
    }

    /// RGBA contents of the last rendered frame.
    #[must_use]
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    #[must_use]
    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    fn draw_placeholder(&mut self) {
        for pixel in self.framebuffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&PLACEHOLDER_RGBA);
        }
    }

    fn draw_texture(framebuffer: &mut [u8], bounds: PixelRect, texture: &RgbaFrame) {
        let out_width = bounds.width() as usize;
        let out_height = bounds.height() as usize;
        let tex_width = texture.width() as usize;
        let tex_height = texture.height() as usize;

        for (y, row) in framebuffer.chunks_exact_mut(out_width * 4).enumerate() {
            let ty = y * tex_height / out_height;

            for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                let tx = x * tex_width / out_width;
                let start = (ty * tex_width + tx) * 4;

                pixel.copy_from_slice(&texture.data()[start..start + 4]);
            }
        }
    }
}

impl Device for SoftwareDevice {
    type Error = Infallible;

    fn bounds(&self) -> PixelRect {
        self.bounds
    }

    fn upload(&mut self, pixel_buffer: &PixelBuffer) -> Result<(), Infallible> {
        self.texture = Some(RgbaFrame::from_pixel_buffer(pixel_buffer));
        self.uploads += 1;

        Ok(())
    }

    fn render(&mut self) -> Result<(), Infallible> {
        match &self.texture {
            Some(texture)
                if !self.bounds.is_empty() && texture.width() > 0 && texture.height() > 0 =>
            {
                Self::draw_texture(&mut self.framebuffer, self.bounds, texture);
            }
            _ => self.draw_placeholder(),
        }

        self.frames_rendered += 1;

        Ok(())
    }

    fn download(&self, region: PixelRect) -> DownloadCompletion {
        spawn_readback(self.texture.clone(), region)
    }

    fn set_cursor_grabbed(&mut self, grabbed: bool) -> Result<(), Infallible> {
        self.cursor_grabbed = grabbed;

        Ok(())
    }
}
