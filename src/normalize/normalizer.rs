//! Background strip, crop, scale and recomposite.

use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::error::Result;
use crate::image::{load_image, save_png, Compression};

use super::background::strip_background;
use super::bbox::{bounding_box, crop_to, BoundingBox};
use super::compose::{center_offset, composite_centered};
use super::config::NormalizeConfig;
use super::fit::{max_content_dim, resize_to_fit};

/// Where the content ended up on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Box of visible content in the source, `None` for a blank source.
    pub bounding_box: Option<BoundingBox>,

    /// Number of near-white pixels cleared from the source.
    pub cleared: usize,

    /// Dimensions of the resized content.
    pub content: (u32, u32),

    /// Top-left position of the content on the canvas.
    pub offset: (i64, i64),
}

/// An opaque canvas together with its layout.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub image: RgbImage,
    pub layout: Layout,
}

/// Normalize a single image.
///
/// Shorthand for [`Normalizer::new`] followed by [`Normalizer::normalize`].
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn normalize(source: &DynamicImage, config: &NormalizeConfig) -> Result<RgbImage> {
    Ok(Normalizer::new(*config)?.normalize(source).image)
}

/// Reusable normalizer for one set of parameters.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    /// Create a normalizer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: NormalizeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the full pipeline on an in-memory image.
    ///
    /// 1. Convert to RGBA
    /// 2. Clear near-white pixels
    /// 3. Crop to the remaining content (skipped with a warning if none)
    /// 4. Scale so the larger side fills `scale` of the canvas
    /// 5. Center on an opaque canvas of the background color
    #[must_use]
    pub fn normalize(&self, source: &DynamicImage) -> Normalized {
        let config = &self.config;

        let mut rgba = source.to_rgba8();
        let cleared = strip_background(&mut rgba, config.threshold);
        tracing::debug!(
            "Cleared {cleared} near-white pixels (threshold {})",
            config.threshold
        );

        let bbox = bounding_box(&rgba);
        let cropped = match bbox {
            Some(bbox) => {
                tracing::debug!("Content bounding box: {bbox:?}");
                crop_to(&rgba, bbox)
            }
            None => {
                tracing::warn!("No visible content found, using the uncropped image");
                rgba
            }
        };

        let max_dim = max_content_dim(config.target, config.scale);
        let content = resize_to_fit(&cropped, max_dim);
        let offset = center_offset(config.target, content.dimensions());
        let image = composite_centered(&content, config.target, config.background);

        Normalized {
            image,
            layout: Layout {
                bounding_box: bbox,
                cleared,
                content: content.dimensions(),
                offset,
            },
        }
    }

    /// Normalize an image file and write the result as PNG.
    ///
    /// Input and output may be the same path; the source is fully decoded
    /// before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be decoded or the output cannot
    /// be written.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<Layout> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        tracing::info!("Processing image: {}", input_path.display());
        let source = load_image(input_path)?;

        let Normalized { image, layout } = self.normalize(&source);

        tracing::info!(
            "Saving {} (content {}x{} at {:?}, scale {})",
            output_path.display(),
            layout.content.0,
            layout.content.1,
            layout.offset,
            self.config.scale
        );
        save_png(&image, output_path, Compression::Default)?;

        Ok(layout)
    }
}
