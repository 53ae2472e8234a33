//! Pure Rust codec backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Encode → PNG | `image::save_buffer_with_format` |
//! | Resample | `image::imageops::resize`, filter from [`ResampleFilter`] |
//!
//! Decoded images keep their native channel count (gray, gray+alpha, RGB,
//! RGBA). Anything deeper than 8 bits per sample is narrowed to 8 bits.

use super::backend::{CodecError, ImageBackend};
use super::params::ResampleFilter;
use crate::buffer::PixelBuffer;
use image::imageops::FilterType;
use image::{
    DynamicImage, ExtendedColorType, ImageBuffer, ImageFormat, ImageReader, Luma, LumaA, Pixel,
    Rgb, Rgba,
};
use log::debug;
use std::path::Path;
use std::sync::LazyLock;

const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("bmp", ImageFormat::Bmp),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Backend using the `image` crate for every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend {
    filter: ResampleFilter,
}

impl RustBackend {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }
}

fn filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Nearest => FilterType::Nearest,
        ResampleFilter::Triangle => FilterType::Triangle,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Gaussian => FilterType::Gaussian,
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

fn color_type(channels: usize) -> ExtendedColorType {
    match channels {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        _ => ExtendedColorType::Rgba8,
    }
}

/// Flatten a decoded image into 8-bit samples, keeping its channel layout.
fn into_pixel_buffer(img: DynamicImage) -> Result<PixelBuffer, CodecError> {
    let (width, height) = (img.width(), img.height());
    let channels = usize::from(img.color().channel_count()).min(4);
    let samples = match channels {
        1 => img.into_luma8().into_raw(),
        2 => img.into_luma_alpha8().into_raw(),
        3 => img.into_rgb8().into_raw(),
        _ => img.into_rgba8().into_raw(),
    };
    Ok(PixelBuffer::new(width, height, channels, samples)?)
}

/// Resize `source` interpreted as pixels of type `P`.
fn resize_as<P>(
    source: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Option<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let view: ImageBuffer<P, &[u8]> =
        ImageBuffer::from_raw(source.width(), source.height(), source.samples())?;
    Some(image::imageops::resize(&view, width, height, filter).into_raw())
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CodecError> {
        let decode_err = |reason: String| CodecError::Decode {
            path: path.to_path_buf(),
            reason,
        };
        let img = ImageReader::open(path)
            .map_err(|e| decode_err(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| decode_err(e.to_string()))?
            .decode()
            .map_err(|e| decode_err(e.to_string()))?;
        debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );
        into_pixel_buffer(img)
    }

    fn encode_png(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), CodecError> {
        image::save_buffer_with_format(
            path,
            buffer.samples(),
            buffer.width(),
            buffer.height(),
            color_type(buffer.channels()),
            ImageFormat::Png,
        )
        .map_err(|e| CodecError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            "encoded {} ({}x{}x{})",
            path.display(),
            buffer.width(),
            buffer.height(),
            buffer.channels()
        );
        Ok(())
    }

    fn resample(
        &self,
        source: &PixelBuffer,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, CodecError> {
        let filter = filter_type(self.filter);
        let samples = match source.channels() {
            1 => resize_as::<Luma<u8>>(source, width, height, filter),
            2 => resize_as::<LumaA<u8>>(source, width, height, filter),
            3 => resize_as::<Rgb<u8>>(source, width, height, filter),
            _ => resize_as::<Rgba<u8>>(source, width, height, filter),
        }
        .ok_or_else(|| {
            CodecError::Resample(format!(
                "{}x{}x{} source does not fit its pixel layout",
                source.width(),
                source.height(),
                source.channels()
            ))
        })?;
        Ok(PixelBuffer::new(width, height, source.channels(), samples)?)
    }
}
