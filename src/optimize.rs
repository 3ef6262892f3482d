//! Illustration optimization: flatten transparency and cap dimensions.

use std::path::Path;

use image::{imageops, imageops::FilterType, DynamicImage, RgbImage};

use crate::error::{Error, Result};
use crate::image::{load_image, save_png, Compression};
use crate::normalize::{fit_within, flatten, Color};

/// Default bounding edge for illustrations.
pub const DEFAULT_MAX_SIZE: u32 = 512;

/// Options for [`optimize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Neither side of the output exceeds this.
    pub max_size: u32,

    /// Color transparent regions are flattened onto.
    pub background: Color,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            background: Color::WHITE,
        }
    }
}

impl OptimizeOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::invalid("max_size", "must be greater than 0"));
        }
        Ok(())
    }
}

/// Flatten `img` onto the background and shrink it to fit `max_size`.
///
/// Images already inside the bound keep their dimensions; nothing is
/// scaled up. A `max_size` of zero is treated as one.
#[must_use]
pub fn optimize(img: &DynamicImage, options: &OptimizeOptions) -> RgbImage {
    let max_size = options.max_size.max(1);

    let flat = if img.color().has_alpha() {
        flatten(&img.to_rgba8(), options.background)
    } else {
        img.to_rgb8()
    };

    let (width, height) = flat.dimensions();
    if width <= max_size && height <= max_size {
        return flat;
    }

    let (new_width, new_height) = fit_within(width, height, max_size);
    tracing::debug!("Shrinking {width}x{height} -> {new_width}x{new_height}");
    imageops::resize(&flat, new_width, new_height, FilterType::Lanczos3)
}

/// Optimize an image file, writing a best-compression PNG to `output`.
///
/// `input` and `output` may be the same path.
///
/// # Errors
///
/// Returns an error if the options are invalid, the input cannot be
/// decoded, or the output cannot be written.
pub fn optimize_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &OptimizeOptions,
) -> Result<(u32, u32)> {
    options.validate()?;

    let input = input.as_ref();
    let output = output.as_ref();

    let source = load_image(input)?;
    let optimized = optimize(&source, options);
    save_png(&optimized, output, Compression::Best)?;

    tracing::info!(
        "Optimized {} -> {} ({}x{})",
        input.display(),
        output.display(),
        optimized.width(),
        optimized.height()
    );

    Ok(optimized.dimensions())
}
