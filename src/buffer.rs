//! Interleaved 8-bit pixel buffers.
//!
//! A [`PixelBuffer`] is the unit every operation in the crate consumes and
//! produces: a flat `Vec<u8>` plus the width, height and channel count needed
//! to interpret it. Samples are stored pixel by pixel, row-major, with the
//! channels of one pixel adjacent:
//!
//! ```text
//! R G B | R G B | R G B ...     (3 channels, stride 3)
//! L A   | L A   | L A   ...     (2 channels, stride 2)
//! ```
//!
//! The constructor is the only way in, and it checks the length invariant,
//! so every other module can index with `pixel * stride + channel` without
//! re-validating.

use thiserror::Error;

/// Largest channel count a buffer may carry (RGBA).
pub const MAX_CHANNELS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("invalid dimensions {width}x{height}: width and height must be at least 1")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("unsupported channel count {0}: expected 1-4")]
    UnsupportedChannelCount(usize),
    #[error("sample buffer holds {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("channel {channel} is not present in a {channels}-channel image")]
    InvalidChannel { channel: Channel, channels: usize },
}

/// A color channel, identified by its offset within a pixel's sample group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
    Alpha = 3,
}

impl Channel {
    /// The color channels the histogram and filter commands operate on.
    pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside one pixel.
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Lowercase name used in output filenames and messages.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An owned image: `width * height * channels` interleaved samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw samples, validating dimensions, channel count and length.
    pub fn new(
        width: u32,
        height: u32,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let expected = expected_len(width, height, channels)?;
        if samples.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// A buffer with every sample set to `value`.
    pub fn filled(
        width: u32,
        height: u32,
        channels: usize,
        value: u8,
    ) -> Result<Self, BufferError> {
        let len = expected_len(width, height, channels)?;
        Self::new(width, height, channels, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel; also the stride between same-channel samples.
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Whether `channel` exists in this buffer.
    pub fn has_channel(&self, channel: Channel) -> bool {
        channel.offset() < self.channels
    }

    /// Fail with [`BufferError::InvalidChannel`] unless `channel` exists.
    pub fn check_channel(&self, channel: Channel) -> Result<(), BufferError> {
        if self.has_channel(channel) {
            Ok(())
        } else {
            Err(BufferError::InvalidChannel {
                channel,
                channels: self.channels,
            })
        }
    }

    /// Whether `channel` holds color data rather than whatever happens to sit
    /// at its offset. In a gray+alpha image offset 1 is alpha, so only red
    /// (the luminance) counts as a color channel there.
    pub fn has_color_channel(&self, channel: Channel) -> bool {
        self.has_channel(channel) && (channel == Channel::Red || self.channels >= 3)
    }

    /// Like [`check_channel`](Self::check_channel), using
    /// [`has_color_channel`](Self::has_color_channel).
    pub fn check_color_channel(&self, channel: Channel) -> Result<(), BufferError> {
        if self.has_color_channel(channel) {
            Ok(())
        } else {
            Err(BufferError::InvalidChannel {
                channel,
                channels: self.channels,
            })
        }
    }

    /// The samples of one pixel. Panics if `(x, y)` is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = self.pixel_start(x, y);
        &self.samples[start..start + self.channels]
    }

    /// Mutable samples of one pixel. Panics if `(x, y)` is out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let start = self.pixel_start(x, y);
        &mut self.samples[start..start + self.channels]
    }

    /// Iterate the samples of a single channel, one per pixel.
    pub fn channel_samples(
        &self,
        channel: Channel,
    ) -> Result<impl Iterator<Item = u8> + '_, BufferError> {
        self.check_channel(channel)?;
        Ok(self
            .samples
            .iter()
            .skip(channel.offset())
            .step_by(self.channels)
            .copied())
    }

    fn pixel_start(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * self.channels
    }
}

fn expected_len(width: u32, height: u32, channels: usize) -> Result<usize, BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::InvalidDimensions { width, height });
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(BufferError::UnsupportedChannelCount(channels));
    }
    Ok(width as usize * height as usize * channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_length() {
        let buf = PixelBuffer::new(2, 3, 3, vec![0; 18]).unwrap();
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.channels(), 3);
        assert_eq!(buf.pixel_count(), 6);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = PixelBuffer::new(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            BufferError::LengthMismatch {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 4, 3, vec![]),
            Err(BufferError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            PixelBuffer::filled(4, 0, 1, 0),
            Err(BufferError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn new_rejects_bad_channel_counts() {
        assert_eq!(
            PixelBuffer::new(1, 1, 0, vec![]).unwrap_err(),
            BufferError::UnsupportedChannelCount(0)
        );
        assert_eq!(
            PixelBuffer::new(1, 1, 5, vec![0; 5]).unwrap_err(),
            BufferError::UnsupportedChannelCount(5)
        );
    }

    #[test]
    fn pixel_addresses_row_major() {
        let samples: Vec<u8> = (0..12).collect();
        let buf = PixelBuffer::new(2, 2, 3, samples).unwrap();
        assert_eq!(buf.pixel(0, 0), &[0, 1, 2]);
        assert_eq!(buf.pixel(1, 0), &[3, 4, 5]);
        assert_eq!(buf.pixel(0, 1), &[6, 7, 8]);
        assert_eq!(buf.pixel(1, 1), &[9, 10, 11]);
    }

    #[test]
    fn pixel_mut_writes_through() {
        let mut buf = PixelBuffer::filled(2, 1, 3, 0).unwrap();
        buf.pixel_mut(1, 0).copy_from_slice(&[7, 8, 9]);
        assert_eq!(buf.samples(), &[0, 0, 0, 7, 8, 9]);
    }

    #[test]
    #[should_panic(expected = "outside 2x1 buffer")]
    fn pixel_out_of_bounds_panics() {
        let buf = PixelBuffer::filled(2, 1, 3, 0).unwrap();
        buf.pixel(2, 0);
    }

    #[test]
    fn channel_samples_strides_over_pixels() {
        let buf = PixelBuffer::new(3, 1, 3, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        let green: Vec<u8> = buf.channel_samples(Channel::Green).unwrap().collect();
        assert_eq!(green, vec![2, 5, 8]);
    }

    #[test]
    fn channel_samples_rejects_missing_channel() {
        let gray = PixelBuffer::filled(2, 2, 1, 0).unwrap();
        assert!(gray.channel_samples(Channel::Red).is_ok());
        assert_eq!(
            gray.channel_samples(Channel::Blue).err(),
            Some(BufferError::InvalidChannel {
                channel: Channel::Blue,
                channels: 1
            })
        );
    }

    #[test]
    fn gray_alpha_has_no_green_color_channel() {
        let gray_alpha = PixelBuffer::filled(2, 2, 2, 0).unwrap();
        assert!(gray_alpha.has_channel(Channel::Green));
        assert!(!gray_alpha.has_color_channel(Channel::Green));
        assert!(gray_alpha.has_color_channel(Channel::Red));
        assert_eq!(
            gray_alpha.check_color_channel(Channel::Green),
            Err(BufferError::InvalidChannel {
                channel: Channel::Green,
                channels: 2
            })
        );

        let rgb = PixelBuffer::filled(1, 1, 3, 0).unwrap();
        assert!(Channel::RGB.iter().all(|&c| rgb.has_color_channel(c)));
        assert!(!rgb.has_color_channel(Channel::Alpha));
    }

    #[test]
    fn channel_offsets_and_names() {
        assert_eq!(Channel::Red.offset(), 0);
        assert_eq!(Channel::Alpha.offset(), 3);
        assert_eq!(Channel::Green.to_string(), "green");
        assert_eq!(Channel::RGB.map(Channel::name), ["red", "green", "blue"]);
    }
}
