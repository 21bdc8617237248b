//! Barcode - Code 128 linear symbols
//!
//! [`encode`] turns text into a [`Symbol`] (start, data, checksum and stop
//! values), [`rasterize`] draws it as an 8-bit gray image, and the decoder
//! reads modules or rasters back into text.

mod code128;
mod decode;
mod error;
mod raster;

pub use code128::*;
pub use decode::*;
pub use error::*;
pub use raster::*;
