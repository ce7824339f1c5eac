use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};

/// Pixels per QR module
const MODULE_SIZE: u32 = 8;
/// Light modules around the symbol
const QUIET_ZONE: u32 = 4;

/// Renders `text` as a black-on-white QR code image
pub fn qr_image(text: &str) -> GrayImage {
    let code = QrCode::new(text.as_bytes()).unwrap();
    let width = code.width() as u32;
    let colors = code.to_colors();
    let side = (width + 2 * QUIET_ZONE) * MODULE_SIZE;

    GrayImage::from_fn(side, side, |x, y| {
        let mx = x / MODULE_SIZE;
        let my = y / MODULE_SIZE;
        let inside = mx >= QUIET_ZONE && my >= QUIET_ZONE
            && mx < width + QUIET_ZONE && my < width + QUIET_ZONE;
        if inside {
            let idx = ((my - QUIET_ZONE) * width + (mx - QUIET_ZONE)) as usize;
            match colors[idx] {
                Color::Dark => Luma([0]),
                Color::Light => Luma([255]),
            }
        } else {
            Luma([255])
        }
    })
}

/// A plain white image with no symbol
pub fn blank_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([255]))
}

pub fn png_bytes(image: GrayImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

pub fn jpeg_bytes(image: GrayImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, 95))
        .unwrap();
    buffer
}

/// Creates a little-endian TIFF block with an Exif IFD holding DateTimeOriginal
///
/// `datetime` uses the EXIF layout `YYYY:MM:DD HH:MM:SS`.
pub fn exif_tiff_block(datetime: &str) -> Vec<u8> {
    let mut buffer = Vec::new();

    // TIFF header
    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II for little-endian
    buffer.write_u16::<LittleEndian>(42).unwrap();     // TIFF magic number
    buffer.write_u32::<LittleEndian>(8).unwrap();      // IFD0 offset

    // IFD0 (at offset 8): pointer to the Exif IFD
    buffer.write_u16::<LittleEndian>(1).unwrap();      // Entry count
    buffer.write_u16::<LittleEndian>(0x8769).unwrap(); // ExifIFDPointer
    buffer.write_u16::<LittleEndian>(4).unwrap();      // Type (LONG)
    buffer.write_u32::<LittleEndian>(1).unwrap();      // Count
    buffer.write_u32::<LittleEndian>(26).unwrap();     // Exif IFD offset
    buffer.write_u32::<LittleEndian>(0).unwrap();      // No next IFD

    // Exif IFD (at offset 26)
    let mut ascii = datetime.as_bytes().to_vec();
    ascii.push(0);
    buffer.write_u16::<LittleEndian>(1).unwrap();      // Entry count
    buffer.write_u16::<LittleEndian>(0x9003).unwrap(); // DateTimeOriginal
    buffer.write_u16::<LittleEndian>(2).unwrap();      // Type (ASCII)
    buffer.write_u32::<LittleEndian>(ascii.len() as u32).unwrap();
    buffer.write_u32::<LittleEndian>(44).unwrap();     // Value offset
    buffer.write_u32::<LittleEndian>(0).unwrap();      // No next IFD

    // Value area (at offset 44)
    buffer.extend_from_slice(&ascii);
    buffer
}

/// Inserts an EXIF APP1 segment right after the JPEG SOI marker
pub fn with_exif(jpeg: Vec<u8>, datetime: &str) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG stream");

    let tiff = exif_tiff_block(datetime);
    let mut segment = Vec::new();
    segment.extend_from_slice(&[0xFF, 0xE1]);
    segment.write_u16::<BigEndian>((2 + 6 + tiff.len()) as u16).unwrap();
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);

    let mut output = Vec::with_capacity(jpeg.len() + segment.len());
    output.extend_from_slice(&jpeg[..2]);
    output.extend_from_slice(&segment);
    output.extend_from_slice(&jpeg[2..]);
    output
}
