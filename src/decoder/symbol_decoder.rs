//! QR symbol decoding strategy

use std::fmt;

use log::debug;

use super::pixels::PixelBuffer;

/// Why no payload could be produced for an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The image bytes could not be read
    Unreadable(String),
    /// The bytes are not a decodable image
    InvalidImage(String),
    /// No QR symbol was found in the image
    NoSymbol,
    /// A symbol was found but its content could not be decoded
    Malformed(String),
    /// The decoder panicked on this input
    Panicked,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::Unreadable(e) => write!(f, "cannot read image: {}", e),
            DecodeFailure::InvalidImage(e) => write!(f, "cannot decode image: {}", e),
            DecodeFailure::NoSymbol => write!(f, "no QR code found"),
            DecodeFailure::Malformed(e) => write!(f, "QR code could not be decoded: {}", e),
            DecodeFailure::Panicked => write!(f, "decoder panicked"),
        }
    }
}

/// Strategy for decoding a symbol from pixel data
pub trait SymbolDecoder: Send + Sync {
    /// Decode the first readable symbol in the image
    fn decode(&self, pixels: &PixelBuffer) -> Result<String, DecodeFailure>;

    /// Name of this decoder, for logging
    fn name(&self) -> &'static str;
}

/// QR decoder backed by `rqrr`
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        RqrrDecoder
    }
}

impl SymbolDecoder for RqrrDecoder {
    fn decode(&self, pixels: &PixelBuffer) -> Result<String, DecodeFailure> {
        if pixels.is_empty() {
            return Err(DecodeFailure::NoSymbol);
        }

        let width = pixels.width as usize;
        let height = pixels.height as usize;
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
            pixels.luma[y * width + x]
        });

        let grids = prepared.detect_grids();
        debug!("Detected {} candidate grid(s)", grids.len());

        let mut last_error = None;
        for grid in grids {
            match grid.decode() {
                Ok((_meta, content)) => return Ok(content),
                Err(e) => last_error = Some(format!("{:?}", e)),
            }
        }

        Err(match last_error {
            Some(e) => DecodeFailure::Malformed(e),
            None => DecodeFailure::NoSymbol,
        })
    }

    fn name(&self) -> &'static str {
        "rqrr"
    }
}
