//! PNG output of a finished [`RasterCanvas`].
//!
//! Feature-gated behind `png` (default on) so library users that only need
//! rewriting and interpretation do not pull in the `image` crate.

use std::path::Path;

use turtle_art_core::{EngineError, RasterCanvas};

/// Writes the canvas as an 8-bit RGBA PNG.
///
/// Returns `EngineError::InvalidDimensions` if the canvas dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(canvas: &RasterCanvas, path: &Path) -> Result<(), EngineError> {
    let w = u32::try_from(canvas.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, canvas.as_rgba8().to_vec())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use turtle_art_core::{Canvas, Gradient};

    #[test]
    fn written_png_reads_back_with_same_pixels() {
        let mut canvas = RasterCanvas::new(16, 8).unwrap();
        canvas.fill_background_gradient(&Gradient::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");

        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 8);
        assert_eq!(img.as_raw().as_slice(), canvas.as_rgba8());
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let canvas = RasterCanvas::new(2, 2).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let err = write_png(&canvas, &path).unwrap_err();
        assert!(matches!(err, EngineError::Io(ref msg) if msg.contains("out.png")));
    }
}
