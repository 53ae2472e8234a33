//! # imgedit
//!
//! An interactive command-line image editor. Load a raster image, apply
//! simple per-pixel operations from a numbered menu, and every result is
//! written to a new PNG.
//!
//! # Architecture: Buffers In, Buffers Out
//!
//! Everything revolves around one type, [`buffer::PixelBuffer`]: a flat
//! `Vec<u8>` of interleaved samples plus width, height and channel count.
//!
//! ```text
//! decode ──► PixelBuffer ──► transform | histogram | resize ──► PixelBuffer ──► encode PNG
//! ```
//!
//! The pixel modules never touch the filesystem, and the codec never looks at
//! individual pixels. That split means every numeric rule (saturation,
//! threshold strictness, bar scaling) is unit-tested on in-memory buffers,
//! while the [`session`] is tested against a recording mock backend.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`buffer`] | `PixelBuffer`, `Channel`, and the length/channel invariants |
//! | [`transform`] | In-place threshold and saturating channel boost |
//! | [`histogram`] | Per-channel counts and the 512x256 bar-chart renderer |
//! | [`resize`] | Size-checked resizing on top of the backend's resampler |
//! | [`imaging`] | `ImageBackend` trait and the `image`-crate implementation |
//! | [`session`] | Original + working buffers, paths, and command execution |
//! | [`console`] | Prompt/menu loop over any `BufRead` + `Write` |
//! | [`config`] | `imgedit.toml` loading, merging, and validation |
//! | [`naming`] | Output filename conventions |
//! | [`output`] | Console message formatting |
//!
//! # Design Decisions
//!
//! ## Original vs. Working Copy
//!
//! The session keeps the decoded image untouched as the *original* and runs
//! the channel filters on a separate *working copy*. Resize, histogram and
//! threshold always start from the original, so their results do not depend
//! on which filters ran earlier, while filters stack: two red filters add
//! twice the boost.
//!
//! ## Saturating, Never Wrapping
//!
//! Channel boosts clamp at 255. A bright red plus a boost stays fully red
//! instead of wrapping round to near-black.
//!
//! ## Explicit Channels
//!
//! Histograms and filters take a [`buffer::Channel`] and validate it against
//! the image's channel count, so a grayscale image gets a clear error for
//! "green" instead of reading the wrong samples.

pub mod buffer;
pub mod config;
pub mod console;
pub mod histogram;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod resize;
pub mod session;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_helpers;
