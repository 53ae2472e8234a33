//! In-place per-sample transforms.
//!
//! Both functions mutate the buffer they are given and allocate nothing.

use crate::buffer::{BufferError, Channel, PixelBuffer};

/// Binarize every sample: 255 if it is strictly above `cutoff`, else 0.
///
/// All channels are thresholded independently. `cutoff` is not clamped: a
/// negative cutoff turns everything white, one of 255 or more turns
/// everything black.
pub fn threshold(buffer: &mut PixelBuffer, cutoff: i32) {
    for sample in buffer.samples_mut() {
        *sample = if i32::from(*sample) > cutoff { 255 } else { 0 };
    }
}

/// Add `delta` to one channel of every pixel, saturating at 255.
///
/// Other channels are left untouched. Fails without modifying anything when
/// the buffer has no such channel.
pub fn boost_channel(
    buffer: &mut PixelBuffer,
    channel: Channel,
    delta: u8,
) -> Result<(), BufferError> {
    buffer.check_channel(channel)?;
    let stride = buffer.channels();
    for sample in buffer
        .samples_mut()
        .iter_mut()
        .skip(channel.offset())
        .step_by(stride)
    {
        *sample = sample.saturating_add(delta);
    }
    Ok(())
}
