//! Image loading utilities.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::{Error, Result};

/// Load an image from disk.
///
/// The format is guessed from the file contents, so a PNG saved with a
/// `.jpg` extension still decodes. Any color mode the codec supports is
/// accepted; callers convert to RGBA themselves.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file cannot be read or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    let img = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(source),
        })?
        .decode()
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;

    let (width, height) = img.dimensions();
    tracing::debug!("Loaded {} ({width}x{height}, {:?})", path.display(), img.color());

    Ok(img)
}
