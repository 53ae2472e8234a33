//! Shared buffer builders for the unit test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let buf = rgb_buffer(2, 1, &[[255, 0, 0], [0, 0, 255]]);
//! let noisy = gradient_buffer(64, 32, 4);
//! ```

use crate::buffer::PixelBuffer;

// =========================================================================
// Builders — panic on malformed input, tests only
// =========================================================================

/// Build an RGB buffer from one `[r, g, b]` triple per pixel, row-major.
pub fn rgb_buffer(width: u32, height: u32, pixels: &[[u8; 3]]) -> PixelBuffer {
    let samples = pixels.iter().flatten().copied().collect();
    PixelBuffer::new(width, height, 3, samples).unwrap_or_else(|e| {
        panic!("rgb_buffer({width}x{height}, {} pixels): {e}", pixels.len())
    })
}

/// Build a buffer where every pixel has the same samples.
pub fn uniform_buffer(width: u32, height: u32, pixel: &[u8]) -> PixelBuffer {
    let samples = pixel
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * pixel.len())
        .collect();
    PixelBuffer::new(width, height, pixel.len(), samples).unwrap()
}

/// A deterministic buffer whose samples sweep the whole 0-255 range.
///
/// Each channel gets a different pattern so per-channel code cannot pass by
/// accident when it reads the wrong offset.
pub fn gradient_buffer(width: u32, height: u32, channels: usize) -> PixelBuffer {
    let mut samples = Vec::with_capacity(width as usize * height as usize * channels);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels as u32 {
                let v = (x * 7 + y * 13 + c * 61) % 256;
                samples.push(v as u8);
            }
        }
    }
    PixelBuffer::new(width, height, channels, samples).unwrap()
}
