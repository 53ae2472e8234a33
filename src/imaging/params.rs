//! Parameter types for image operations.
//!
//! These types describe *what* the backend should do, not *how*. The mapping
//! onto concrete `image` crate filters lives in
//! [`rust_backend`](super::rust_backend), so configuration and tests never
//! depend on the codec crate directly.

use serde::{Deserialize, Serialize};

/// Interpolation kernel used when resizing.
///
/// Named in config files in kebab-case, e.g. `filter = "catmull-rom"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Nearest neighbour. Blocky, but never invents new sample values.
    Nearest,
    /// Bilinear.
    Triangle,
    /// Bicubic, sharp without much ringing.
    #[default]
    CatmullRom,
    Gaussian,
    /// Highest quality, slowest.
    Lanczos3,
}

impl ResampleFilter {
    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::CatmullRom => "catmull-rom",
            ResampleFilter::Gaussian => "gaussian",
            ResampleFilter::Lanczos3 => "lanczos3",
        }
    }
}
