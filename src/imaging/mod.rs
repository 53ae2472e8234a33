//! Image file I/O and resampling, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, BMP, TIFF, WebP) |
//! | **Encode** | `image::save_buffer_with_format` → PNG |
//! | **Resample** | `image::imageops::resize` |
//!
//! The module is split into:
//! - **Parameters**: [`ResampleFilter`], the configurable interpolation kernel
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{CodecError, ImageBackend};
pub use params::ResampleFilter;
pub use rust_backend::{RustBackend, supported_input_extensions};
