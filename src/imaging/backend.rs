//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the editor needs
//! from the outside world: decode a file into a [`PixelBuffer`], encode a
//! buffer as PNG, and resample a buffer to new dimensions.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` in [`tests`].

use crate::buffer::{BufferError, PixelBuffer};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("cannot write {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
    #[error("resampling failed: {0}")]
    Resample(String),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Trait for image codec backends.
///
/// Every backend must implement all three operations so the session and the
/// [`resize`](crate::resize) module stay backend-agnostic.
pub trait ImageBackend {
    /// Read and decode an image file. The channel count follows the file.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CodecError>;

    /// Write `buffer` as a PNG, row stride `width * channels`.
    fn encode_png(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), CodecError>;

    /// Resample `source` to `width` x `height`, channel count preserved.
    fn resample(
        &self,
        source: &PixelBuffer,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, CodecError>;
}
