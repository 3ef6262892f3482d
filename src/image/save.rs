//! Image saving utilities.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::RgbImage;

use crate::error::{Error, Result};

/// PNG compression effort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Encoder defaults.
    #[default]
    Default,
    /// Smallest output, slowest encode.
    Best,
}

impl Compression {
    const fn png_settings(self) -> (CompressionType, FilterType) {
        match self {
            Self::Default => (CompressionType::Default, FilterType::Adaptive),
            Self::Best => (CompressionType::Best, FilterType::Adaptive),
        }
    }
}

/// Save an opaque RGB image as PNG.
///
/// The output is always PNG regardless of the path's extension. Missing
/// parent directories are not created.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the image cannot be
/// encoded.
pub fn save_png<P: AsRef<Path>>(img: &RgbImage, path: P, compression: Compression) -> Result<()> {
    let path = path.as_ref();

    let file = File::create(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(source),
    })?;
    let mut output = BufWriter::new(file);

    let (compression_type, filter) = compression.png_settings();
    let encoder = PngEncoder::new_with_quality(&mut output, compression_type, filter);
    img.write_with_encoder(encoder)
        .map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })?;
    output.flush()?;

    tracing::debug!(
        "Wrote {} ({}x{}, {compression:?})",
        path.display(),
        img.width(),
        img.height()
    );

    Ok(())
}
