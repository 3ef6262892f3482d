//! Aspect-preserving resize into a square bound.

use image::{imageops, imageops::FilterType, Rgba, Rgba32FImage, RgbaImage};

use super::config::Size;

/// Largest side the content may have on `target` at `scale`.
///
/// Computed as `floor(min(width, height) * scale)`, never less than one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn max_content_dim(target: Size, scale: f64) -> u32 {
    // Safe: scale is in (0, 1], so the product never exceeds the u32 side
    let dim = (f64::from(target.min_side()) * scale).floor() as u32;
    dim.max(1)
}

/// Dimensions of a `width`x`height` image scaled so its larger side is
/// exactly `max_dim`.
///
/// The smaller side is rounded down and clamped to at least one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fit_within(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let (w, h, m) = (u64::from(width), u64::from(height), u64::from(max_dim));
    if w == 0 || h == 0 {
        return (max_dim, max_dim);
    }

    // Safe: the scaled smaller side is bounded by max_dim
    if w >= h {
        (max_dim, ((h * m) / w).max(1) as u32)
    } else {
        (((w * m) / h).max(1) as u32, max_dim)
    }
}

/// Convert to floating point with color channels multiplied by alpha.
fn premultiply(img: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    })
}

/// Inverse of [`premultiply`], clamping filter overshoot.
///
/// Color is divided by the unclamped alpha so the ratio survives ringing.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unpremultiply(img: &Rgba32FImage) -> RgbaImage {
    // Safe: values are clamped to [0, 1] before scaling to u8
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;

    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let alpha = to_u8(a);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), alpha])
    })
}

/// Resize `img` so its larger side equals `max_dim`, preserving aspect ratio.
///
/// Filtering runs on premultiplied alpha, so the color of fully transparent
/// pixels never leaks into the content's edges. Content smaller than the
/// bound is scaled up. An image that already has the fitted dimensions is
/// returned unchanged.
#[must_use]
pub fn resize_to_fit(img: &RgbaImage, max_dim: u32) -> RgbaImage {
    let (width, height) = fit_within(img.width(), img.height(), max_dim);

    if (width, height) == img.dimensions() {
        return img.clone();
    }

    tracing::debug!(
        "Resizing content {}x{} -> {width}x{height}",
        img.width(),
        img.height()
    );
    let resized = imageops::resize(&premultiply(img), width, height, FilterType::Lanczos3);
    unpremultiply(&resized)
}
