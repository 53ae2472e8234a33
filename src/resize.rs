//! Resizing with an explicit buffer-size contract.
//!
//! The interpolation itself belongs to the [`ImageBackend`]; this module
//! validates the request, short-circuits same-size requests, and checks that
//! whatever the backend hands back really is `width * height * channels`.

use crate::buffer::{BufferError, PixelBuffer};
use crate::imaging::{CodecError, ImageBackend};
use log::debug;

/// Resize `source` to `width` x `height` without touching it.
///
/// Both dimensions must be at least 1. Asking for the source's own size
/// returns an exact copy.
pub fn resize(
    backend: &impl ImageBackend,
    source: &PixelBuffer,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, CodecError> {
    if width == 0 || height == 0 {
        return Err(BufferError::InvalidDimensions { width, height }.into());
    }
    if (width, height) == (source.width(), source.height()) {
        return Ok(source.clone());
    }

    debug!(
        "resizing {}x{} -> {}x{} ({} channels)",
        source.width(),
        source.height(),
        width,
        height,
        source.channels()
    );
    let resized = backend.resample(source, width, height)?;

    if (resized.width(), resized.height(), resized.channels())
        != (width, height, source.channels())
    {
        return Err(CodecError::Resample(format!(
            "backend returned {}x{}x{}, expected {}x{}x{}",
            resized.width(),
            resized.height(),
            resized.channels(),
            width,
            height,
            source.channels()
        )));
    }
    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::gradient_buffer;
    use std::path::Path;

    /// Backend that ignores the requested size, to exercise the contract check.
    struct WrongSizeBackend;

    impl ImageBackend for WrongSizeBackend {
        fn decode(&self, path: &Path) -> Result<PixelBuffer, CodecError> {
            Err(CodecError::Decode {
                path: path.to_path_buf(),
                reason: "unused".into(),
            })
        }

        fn encode_png(&self, _: &Path, _: &PixelBuffer) -> Result<(), CodecError> {
            Ok(())
        }

        fn resample(
            &self,
            source: &PixelBuffer,
            _: u32,
            _: u32,
        ) -> Result<PixelBuffer, CodecError> {
            Ok(PixelBuffer::filled(1, 1, source.channels(), 0)?)
        }
    }

    #[test]
    fn output_size_matches_request() {
        let src = gradient_buffer(20, 10, 3);
        let out = resize(&MockBackend::new(), &src, 7, 33).unwrap();
        assert_eq!(out.samples().len(), 7 * 33 * 3);
        assert_eq!((out.width(), out.height(), out.channels()), (7, 33, 3));
    }

    #[test]
    fn zero_dimension_is_rejected_before_backend() {
        let backend = MockBackend::new();
        let src = gradient_buffer(4, 4, 3);
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let err = resize(&backend, &src, w, h).unwrap_err();
            assert!(matches!(
                err,
                CodecError::Buffer(BufferError::InvalidDimensions { .. })
            ));
        }
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn same_size_is_exact_copy() {
        let backend = MockBackend::new();
        let src = gradient_buffer(9, 5, 4);
        let out = resize(&backend, &src, 9, 5).unwrap();
        assert_eq!(out, src);
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn source_is_not_mutated() {
        let src = gradient_buffer(16, 16, 3);
        let before = src.clone();
        resize(&RustBackend::default(), &src, 5, 5).unwrap();
        assert_eq!(src, before);
    }

    #[test]
    fn delegates_to_backend() {
        let backend = MockBackend::new();
        resize(&backend, &gradient_buffer(4, 4, 1), 8, 2).unwrap();
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Resample {
                width: 8,
                height: 2
            }]
        );
    }

    #[test]
    fn backend_contract_violation_is_an_error() {
        let err = resize(&WrongSizeBackend, &gradient_buffer(4, 4, 3), 3, 3).unwrap_err();
        assert!(matches!(err, CodecError::Resample(_)));
    }
}
