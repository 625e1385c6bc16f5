use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

const BYTES_PER_PIXEL: usize = 3;

fn pixel_rect_to_buffer_size(pixel_rect: PixelRect) -> usize {
    pixel_rect.size() as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        pixel_rect: PixelRect,
    },
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                pixel_rect_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "pixel rect size {} does not match buffer size {}",
                    pixel_rect_size, buffer_size
                )
            }
            Self::PixelOutsideBounds { pixel, pixel_rect } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} rect at x:{}, y:{}",
                    pixel.x,
                    pixel.y,
                    pixel_rect.width(),
                    pixel_rect.height(),
                    pixel_rect.top_left().x,
                    pixel_rect.top_left().y,
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB image. Once published by the generator it is treated as
/// immutable; ownership moves through the handoff slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            buffer: vec![0; pixel_rect_to_buffer_size(pixel_rect)],
        }
    }

    pub fn from_data(
        pixel_rect: PixelRect,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let buffer_size = pixel_rect_to_buffer_size(pixel_rect);

        if buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    fn index_of(&self, pixel: Point) -> Option<usize> {
        if !self.pixel_rect.contains_point(pixel) {
            return None;
        }

        let relative_x = (pixel.x - self.pixel_rect.top_left().x) as usize;
        let relative_y = (pixel.y - self.pixel_rect.top_left().y) as usize;

        Some((relative_y * self.pixel_rect.width() as usize + relative_x) * BYTES_PER_PIXEL)
    }

    #[must_use]
    pub fn pixel(&self, pixel: Point) -> Option<Colour> {
        self.index_of(pixel).map(|index| Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let Some(index) = self.index_of(pixel) else {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        };

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    /// Paints `area`, silently skipping any part outside the buffer.
    pub fn fill_clipped(&mut self, area: PixelRect, colour: Colour) {
        let origin = area.top_left();

        for dy in 0..area.height() as i32 {
            for dx in 0..area.width() as i32 {
                let _ = self.set_pixel(
                    Point {
                        x: origin.x + dx,
                        y: origin.y + dy,
                    },
                    colour,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Colour = Colour { r: 0, g: 255, b: 0 };

    #[test]
    fn test_new_creates_zeroed_buffer() {
        let buffer = PixelBuffer::new(PixelRect::from_size(10, 10));

        assert_eq!(buffer.buffer().len(), 300);
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty_rect_has_empty_buffer() {
        let buffer = PixelBuffer::new(PixelRect::from_size(0, 7));

        assert!(buffer.buffer().is_empty());
    }

    #[test]
    fn test_from_data_rejects_wrong_length() {
        let result = PixelBuffer::from_data(PixelRect::from_size(2, 2), vec![255, 0, 0]);

        assert_eq!(
            result.unwrap_err(),
            PixelBufferError::BoundsMismatch {
                pixel_rect_size: 12,
                buffer_size: 3
            }
        );
    }

    #[test]
    fn test_set_then_read_pixel() {
        let mut buffer = PixelBuffer::new(PixelRect::from_size(3, 3));

        buffer.set_pixel(Point { x: 1, y: 2 }, GREEN).unwrap();

        assert_eq!(buffer.pixel(Point { x: 1, y: 2 }), Some(GREEN));
        assert_eq!(&buffer.buffer()[21..24], &[0, 255, 0]);
        assert_eq!(buffer.pixel(Point { x: 2, y: 1 }), Some(Colour::BLACK));
    }

    #[test]
    fn test_set_pixel_with_offset_rect() {
        let mut buffer = PixelBuffer::new(PixelRect::new(Point { x: 10, y: 20 }, 3, 3));

        buffer.set_pixel(Point { x: 11, y: 21 }, GREEN).unwrap();

        assert_eq!(&buffer.buffer()[12..15], &[0, 255, 0]);
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let pixel_rect = PixelRect::from_size(3, 3);
        let mut buffer = PixelBuffer::new(pixel_rect);

        let result = buffer.set_pixel(Point { x: -1, y: 3 }, GREEN);

        assert_eq!(
            result,
            Err(PixelBufferError::PixelOutsideBounds {
                pixel: Point { x: -1, y: 3 },
                pixel_rect
            })
        );
        assert_eq!(buffer.pixel(Point { x: 3, y: 0 }), None);
    }

    #[test]
    fn test_fill_clipped_stops_at_buffer_edge() {
        let mut buffer = PixelBuffer::new(PixelRect::from_size(3, 2));

        buffer.fill_clipped(PixelRect::from_size(5, 5), Colour::RED);

        assert!(
            buffer
                .buffer()
                .chunks_exact(3)
                .all(|pixel| pixel == [255, 0, 0])
        );
    }

    #[test]
    fn test_fill_clipped_leaves_remainder_untouched() {
        let mut buffer = PixelBuffer::new(PixelRect::from_size(4, 4));

        buffer.fill_clipped(PixelRect::from_size(2, 2), Colour::RED);

        assert_eq!(buffer.pixel(Point { x: 1, y: 1 }), Some(Colour::RED));
        assert_eq!(buffer.pixel(Point { x: 2, y: 1 }), Some(Colour::BLACK));
        assert_eq!(buffer.pixel(Point { x: 1, y: 2 }), Some(Colour::BLACK));
    }
}
