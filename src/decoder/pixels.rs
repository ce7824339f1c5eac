//! Pixel buffers for symbol detection

use image::DynamicImage;

use crate::errors::ScanResult;

/// Greyscale pixel data of a decoded image
///
/// Stored as 8-bit luma in row-major order, which is what QR detection
/// operates on regardless of the source colour type.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Luma samples, `width * height` bytes
    pub luma: Vec<u8>,
}

impl PixelBuffer {
    /// Decode encoded image bytes (PNG, JPEG, GIF, BMP, ...) into pixels
    ///
    /// # Errors
    /// Fails when the format is not recognised or the data is corrupt.
    pub fn from_bytes(bytes: &[u8]) -> ScanResult<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&image))
    }

    /// Convert an already decoded image
    pub fn from_image(image: &DynamicImage) -> Self {
        let gray_image = image.to_luma8();
        let width = gray_image.width();
        let height = gray_image.height();
        let luma = gray_image.into_raw();

        PixelBuffer { width, height, luma }
    }

    /// Sample at the given position, or None if out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = y as usize * self.width as usize + x as usize;
        self.luma.get(idx).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_from_bytes_converts_to_luma() {
        let mut rgb = RgbImage::new(3, 2);
        rgb.put_pixel(2, 1, Rgb([255, 255, 255]));

        let mut encoded = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .unwrap();

        let pixels = PixelBuffer::from_bytes(&encoded).unwrap();
        assert_eq!((pixels.width, pixels.height), (3, 2));
        assert_eq!(pixels.luma.len(), 6);
        assert_eq!(pixels.get(0, 0), Some(0));
        assert_eq!(pixels.get(2, 1), Some(255));
        assert_eq!(pixels.get(3, 0), None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(PixelBuffer::from_bytes(b"definitely not an image").is_err());
        assert!(PixelBuffer::from_bytes(&[]).is_err());
    }
}
