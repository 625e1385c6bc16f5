//! Pixel format conversion between generated RGB images and RGBA device
//! textures.

/// Copies RGB pixel data to RGBA format, setting alpha to 255.
///
/// # Arguments
/// * `src` - Source buffer with RGB data (3 bytes per pixel)
/// * `dst` - Destination buffer for RGBA data (4 bytes per pixel)
///
/// # Panics
/// Panics if buffer sizes don't match (dst.len() must equal src.len() / 3 * 4)
/// or if `src` is not a multiple of 3.
pub fn copy_rgb_to_rgba(src: &[u8], dst: &mut [u8]) {
    assert!(
        src.len() % 3 == 0,
        "src length {} is not a multiple of 3",
        src.len()
    );
    let expected_dst_len = (src.len() / 3) * 4;
    assert_eq!(
        dst.len(),
        expected_dst_len,
        "dst length {} does not match expected {}",
        dst.len(),
        expected_dst_len
    );

    for (src_pixel, dst_pixel) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[1];
        dst_pixel[2] = src_pixel[2];
        dst_pixel[3] = 255;
    }
}

/// Copies RGBA pixel data to RGB format, dropping alpha.
///
/// # Panics
/// Panics if `src` is not a multiple of 4 or `dst.len()` is not
/// `src.len() / 4 * 3`.
pub fn copy_rgba_to_rgb(src: &[u8], dst: &mut [u8]) {
    assert!(
        src.len() % 4 == 0,
        "src length {} is not a multiple of 4",
        src.len()
    );
    let expected_dst_len = (src.len() / 4) * 3;
    assert_eq!(
        dst.len(),
        expected_dst_len,
        "dst length {} does not match expected {}",
        dst.len(),
        expected_dst_len
    );

    for (src_pixel, dst_pixel) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        dst_pixel.copy_from_slice(&src_pixel[..3]);
    }
}
