//! Per-channel histograms and their bar-chart rendering.
//!
//! [`compute`] counts how often each sample value 0-255 occurs in one channel.
//! [`render`] turns those counts into a fixed-size RGB chart:
//!
//! ```text
//!  row 0   ┌──────────────────────────────┐
//!          │            ▐▌                │   white background
//!          │       ▐▌   ▐▌▐▌              │   one 2px black bar per value,
//!          │  ▐▌▐▌ ▐▌▐▌ ▐▌▐▌▐▌            │   growing up from the bottom
//!  row 255 └──────────────────────────────┘
//!          col 0                    col 511
//! ```
//!
//! Bar heights are scaled so the most frequent value spans the full 256 rows.
//! A bar of height `h` covers rows `255 - h` through 255; values that never
//! occur draw nothing, so a non-empty bucket always shows at least one row.

use crate::buffer::{BufferError, Channel, PixelBuffer};

/// Number of buckets: one per 8-bit sample value.
pub const BUCKETS: usize = 256;
/// Horizontal pixels per bucket in a rendered chart.
pub const BAR_WIDTH: u32 = 2;
pub const CHART_WIDTH: u32 = BUCKETS as u32 * BAR_WIDTH;
pub const CHART_HEIGHT: u32 = 256;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const BAR: [u8; 3] = [0, 0, 0];

/// Frequency of each sample value within one channel of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; BUCKETS],
}

impl Histogram {
    pub fn counts(&self) -> &[u64; BUCKETS] {
        &self.counts
    }

    /// Occurrences of `value`.
    pub fn count(&self, value: u8) -> u64 {
        self.counts[value as usize]
    }

    /// Sum of all buckets; equals the pixel count of the source image.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest bucket, 0 for an empty histogram.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bar height in rows for `value`, scaled against the largest bucket.
    pub fn bar_height(&self, value: u8) -> u32 {
        let max = self.max_count();
        if max == 0 {
            return 0;
        }
        let scaled = self.count(value) as f64 / max as f64 * f64::from(CHART_HEIGHT);
        (scaled.round() as u32).min(CHART_HEIGHT)
    }
}

impl From<[u64; BUCKETS]> for Histogram {
    fn from(counts: [u64; BUCKETS]) -> Self {
        Self { counts }
    }
}

/// Count sample values of `channel` across every pixel of `buffer`.
pub fn compute(buffer: &PixelBuffer, channel: Channel) -> Result<Histogram, BufferError> {
    let mut counts = [0u64; BUCKETS];
    for sample in buffer.channel_samples(channel)? {
        counts[sample as usize] += 1;
    }
    Ok(Histogram { counts })
}

/// Render `histogram` as a 512x256 RGB bar chart.
pub fn render(histogram: &Histogram) -> PixelBuffer {
    let mut samples = BACKGROUND.repeat(CHART_WIDTH as usize * CHART_HEIGHT as usize);
    let row_len = CHART_WIDTH as usize * BACKGROUND.len();

    for value in 0..=u8::MAX {
        if histogram.count(value) == 0 {
            continue;
        }
        // A bar spans rows 255-height through 255, clipped at the top edge.
        let top = CHART_HEIGHT.saturating_sub(histogram.bar_height(value) + 1);
        let left = value as usize * BAR_WIDTH as usize;
        for row in top..CHART_HEIGHT {
            let row_start = row as usize * row_len;
            for col in left..left + BAR_WIDTH as usize {
                let start = row_start + col * BAR.len();
                samples[start..start + BAR.len()].copy_from_slice(&BAR);
            }
        }
    }

    PixelBuffer::new(CHART_WIDTH, CHART_HEIGHT, BACKGROUND.len(), samples)
        .expect("chart dimensions are constant and non-zero")
}
