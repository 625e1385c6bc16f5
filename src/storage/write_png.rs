use std::path::Path;

use image::{ColorType, ImageFormat, ImageResult};

use crate::core::data::pixel_buffer::PixelBuffer;

/// Encodes `buffer` as PNG at `filepath`, replacing any existing file.
///
/// The format is fixed regardless of the path's extension.
pub fn write_png(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> ImageResult<()> {
    image::save_buffer_with_format(
        filepath,
        buffer.buffer(),
        buffer.width(),
        buffer.height(),
        ColorType::Rgb8,
        ImageFormat::Png,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::pixel_rect::PixelRect;
    use crate::core::data::point::Point;

    #[test]
    fn test_written_png_decodes_to_the_same_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut buffer = PixelBuffer::new(PixelRect::from_size(4, 3));
        buffer.set_pixel(Point { x: 0, y: 0 }, Colour::RED).unwrap();
        buffer
            .set_pixel(Point { x: 3, y: 2 }, Colour { r: 10, g: 20, b: 30 })
            .unwrap();

        write_png(&buffer, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.as_raw(), buffer.buffer());
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        std::fs::write(&path, b"stale").unwrap();

        write_png(&PixelBuffer::new(PixelRect::from_size(2, 2)), &path).unwrap();

        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (2, 2));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");

        assert!(write_png(&PixelBuffer::new(PixelRect::from_size(2, 2)), path).is_err());
    }
}
