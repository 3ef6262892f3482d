//! Compositing content onto an opaque canvas.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use super::config::{Color, Size};

/// Top-left offset that centers `content` on `canvas`.
///
/// When the leftover margin is odd, the extra pixel goes to the left/top.
#[must_use]
pub fn center_offset(canvas: Size, content: (u32, u32)) -> (i64, i64) {
    let axis = |outer: u32, inner: u32| (i64::from(outer) - i64::from(inner) + 1).div_euclid(2);
    (axis(canvas.width, content.0), axis(canvas.height, content.1))
}

/// Blend `fg` over the opaque `bg` using `fg`'s alpha as the mask.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn blend(bg: Rgb<u8>, fg: Rgba<u8>) -> Rgb<u8> {
    let alpha = u32::from(fg[3]);
    let inv = 255 - alpha;
    // Safe: weighted average of two u8 values stays within 0..=255
    let mix = |b: u8, f: u8| ((u32::from(f) * alpha + u32::from(b) * inv + 127) / 255) as u8;
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}

/// Paste `content` onto `canvas` at `(x, y)` through its alpha channel.
///
/// Parts falling outside the canvas are clipped.
pub fn paste_masked(canvas: &mut RgbImage, content: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for (sx, sy, pixel) in content.enumerate_pixels() {
        let dx = x + i64::from(sx);
        let dy = y + i64::from(sy);
        if dx < 0 || dy < 0 || dx >= cw || dy >= ch {
            continue;
        }

        // Safe: bounds checked against the canvas above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
        *dst = blend(*dst, *pixel);
    }
}

/// Create an opaque `target` canvas of `background` with `content` centered on it.
#[must_use]
pub fn composite_centered(content: &RgbaImage, target: Size, background: Color) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(target.width, target.height, background.rgb());
    let (x, y) = center_offset(target, content.dimensions());

    tracing::debug!(
        "Compositing {}x{} content at ({x}, {y}) on {target} {background}",
        content.width(),
        content.height()
    );
    paste_masked(&mut canvas, content, x, y);

    canvas
}

/// Drop the alpha channel of `img` by compositing it over `background`.
#[must_use]
pub fn flatten(img: &RgbaImage, background: Color) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(img.width(), img.height(), background.rgb());
    paste_masked(&mut canvas, img, 0, 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_offset_rounds_toward_bottom_right_margin() {
        assert_eq!(center_offset(Size::square(1024), (870, 435)), (77, 295));
        assert_eq!(center_offset(Size::square(10), (4, 4)), (3, 3));
        assert_eq!(center_offset(Size::square(10), (10, 10)), (0, 0));
    }

    #[test]
    fn test_blend_extremes() {
        let bg = Rgb([245, 245, 245]);
        assert_eq!(blend(bg, Rgba([10, 20, 30, 255])), Rgb([10, 20, 30]));
        assert_eq!(blend(bg, Rgba([10, 20, 30, 0])), bg);
    }

    #[test]
    fn test_blend_half() {
        let mixed = blend(Rgb([255, 255, 255]), Rgba([0, 0, 0, 128]));
        assert_eq!(mixed, Rgb([127, 127, 127]));
    }

    #[test]
    fn test_composite_centered() {
        let content = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let canvas = composite_centered(&content, Size::new(6, 4), Color::WHITE);

        assert_eq!(canvas.dimensions(), (6, 4));
        assert_eq!(*canvas.get_pixel(2, 1), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(3, 2), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgb([255, 255, 255]));
        assert_eq!(*canvas.get_pixel(4, 2), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_transparent_content_leaves_background() {
        let content = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 0]));
        let canvas = composite_centered(&content, Size::square(5), Color::WHITE_SMOKE);
        assert!(canvas.pixels().all(|p| *p == Color::WHITE_SMOKE.rgb()));
    }

    #[test]
    fn test_paste_clips_outside_canvas() {
        let mut canvas = RgbImage::from_pixel(2, 2, Rgb([1, 1, 1]));
        let content = RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]));

        paste_masked(&mut canvas, &content, -2, 1);

        assert_eq!(*canvas.get_pixel(0, 1), Rgb([9, 9, 9]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgb([1, 1, 1]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([1, 1, 1]));
    }

    #[test]
    fn test_flatten() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([50, 60, 70, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let flat = flatten(&img, Color::WHITE);
        assert_eq!(*flat.get_pixel(0, 0), Rgb([50, 60, 70]));
        assert_eq!(*flat.get_pixel(1, 0), Rgb([255, 255, 255]));
    }
}
