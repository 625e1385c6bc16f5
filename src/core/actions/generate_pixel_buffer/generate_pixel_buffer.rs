use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use std::error::Error;
use std::fmt;

/// Distinguishes cancellation from a value count that does not fit the rect.
#[derive(Debug, PartialEq)]
pub enum GeneratePixelBufferError {
    Cancelled(Cancelled),
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for GeneratePixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for GeneratePixelBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<PixelBufferError> for GeneratePixelBufferError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Generates a pixel buffer by mapping input values to colours, checking
/// `cancel` every [`CANCEL_CHECK_INTERVAL_PIXELS`] values.
pub fn generate_pixel_buffer_cancelable<T, CMap, C>(
    input: Vec<T>,
    mapper: &CMap,
    pixel_rect: PixelRect,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    CMap: ColourMap<T>,
    C: CancelToken,
{
    let mut buffer: PixelBufferData = Vec::with_capacity(input.len() * 3);

    for (i, value) in input.into_iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
            return Err(GeneratePixelBufferError::Cancelled(Cancelled));
        }

        let Colour { r, g, b } = mapper.map(value);
        buffer.extend_from_slice(&[r, g, b]);
    }

    Ok(PixelBuffer::from_data(pixel_rect, buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Grey;

    impl ColourMap<u8> for Grey {
        fn map(&self, value: u8) -> Colour {
            Colour {
                r: value,
                g: value,
                b: value,
            }
        }
    }

    #[test]
    fn test_generates_pixel_buffer_correctly() {
        let pixel_rect = PixelRect::from_size(3, 2);

        let input = vec![1, 2, 3, 4, 5, 6];

        let result =
            generate_pixel_buffer_cancelable(input, &Grey, pixel_rect, &NeverCancel).unwrap();

        assert_eq!(
            result.buffer(),
            &vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6]
        );
        assert_eq!(result.pixel_rect(), pixel_rect);
    }

    #[test]
    fn test_pixel_rect_input_size_mismatch_returns_err() {
        let result = generate_pixel_buffer_cancelable(
            vec![1, 2, 3, 4, 5, 6],
            &Grey,
            PixelRect::from_size(2, 2),
            &NeverCancel,
        );

        assert_eq!(
            result.unwrap_err(),
            GeneratePixelBufferError::PixelBuffer(PixelBufferError::BoundsMismatch {
                pixel_rect_size: 12,
                buffer_size: 18
            })
        );
    }

    #[test]
    fn test_cancelable_returns_cancelled_when_token_is_cancelled() {
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result = generate_pixel_buffer_cancelable(
            vec![1, 2, 3, 4, 5, 6],
            &Grey,
            PixelRect::from_size(3, 2),
            &cancel_token,
        );

        assert_eq!(result, Err(GeneratePixelBufferError::Cancelled(Cancelled)));
    }

    #[test]
    fn test_error_displays_cancelled() {
        let err = GeneratePixelBufferError::Cancelled(Cancelled);
        assert_eq!(format!("{}", err), "operation cancelled");
    }
}
