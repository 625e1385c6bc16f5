use std::error::Error;
use std::fmt;

use log::warn;
use pixels::{Pixels, SurfaceTexture, TextureError};
use winit::error::ExternalError;
use winit::window::{CursorGrabMode, Window};

use crate::adapters::readback::{RgbaFrame, spawn_readback};
use crate::controllers::render_loop::ports::device::{Device, DownloadCompletion};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;

#[derive(Debug)]
pub enum PixelsDeviceError {
    Render(pixels::Error),
    Texture(TextureError),
    Cursor(ExternalError),
}

impl fmt::Display for PixelsDeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(err) => write!(f, "failed to render: {}", err),
            Self::Texture(err) => write!(f, "failed to resize texture: {}", err),
            Self::Cursor(err) => write!(f, "failed to change cursor grab: {}", err),
        }
    }
}

impl Error for PixelsDeviceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::Texture(err) => Some(err),
            Self::Cursor(err) => Some(err),
        }
    }
}

/// Window-backed device. The pixels buffer is sized to the texture and
/// scaled over the whole surface by the pixels crate.
pub struct PixelsDevice {
    window: &'static Window,
    pixels: Pixels<'static>,
    texture: Option<RgbaFrame>,
}

impl PixelsDevice {
    pub fn new(window: &'static Window) -> Result<Self, PixelsDeviceError> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);

        // One black pixel until the first image arrives.
        let mut pixels = Pixels::new(1, 1, surface_texture).map_err(PixelsDeviceError::Render)?;
        pixels.frame_mut().copy_from_slice(&[0, 0, 0, 255]);

        Ok(Self {
            window,
            pixels,
            texture: None,
        })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), PixelsDeviceError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.pixels
            .resize_surface(width, height)
            .map_err(PixelsDeviceError::Texture)
    }

    #[must_use]
    pub fn window(&self) -> &'static Window {
        self.window
    }
}

impl Device for PixelsDevice {
    type Error = PixelsDeviceError;

    fn bounds(&self) -> PixelRect {
        let size = self.window.inner_size();
        PixelRect::from_size(size.width, size.height)
    }

    fn upload(&mut self, pixel_buffer: &PixelBuffer) -> Result<(), PixelsDeviceError> {
        if pixel_buffer.pixel_rect().is_empty() {
            return Ok(());
        }

        let texture = RgbaFrame::from_pixel_buffer(pixel_buffer);
        let unchanged_size = self
            .texture
            .as_ref()
            .is_some_and(|t| t.width() == texture.width() && t.height() == texture.height());

        if !unchanged_size {
            self.pixels
                .resize_buffer(texture.width(), texture.height())
                .map_err(PixelsDeviceError::Texture)?;
        }

        self.pixels.frame_mut().copy_from_slice(texture.data());
        self.texture = Some(texture);

        Ok(())
    }

    fn render(&mut self) -> Result<(), PixelsDeviceError> {
        self.pixels.render().map_err(PixelsDeviceError::Render)
    }

    fn download(&self, region: PixelRect) -> DownloadCompletion {
        spawn_readback(self.texture.clone(), region)
    }

    fn set_cursor_grabbed(&mut self, grabbed: bool) -> Result<(), PixelsDeviceError> {
        if grabbed {
            // Not every platform supports both modes.
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
                .map_err(PixelsDeviceError::Cursor)?;
        } else if let Err(err) = self.window.set_cursor_grab(CursorGrabMode::None) {
            warn!("Failed to release cursor: {}", err);
        }

        self.window.set_cursor_visible(!grabbed);

        Ok(())
    }
}
