//! Image and symbol decoding
//!
//! Wraps the external image codec and QR decoder behind small interfaces
//! so the pipeline can swap them out.

mod pixels;
mod symbol_decoder;

pub use pixels::PixelBuffer;
pub use symbol_decoder::{DecodeFailure, RqrrDecoder, SymbolDecoder};
