//! Near-white background removal.

use image::{Rgba, RgbaImage};

/// Replacement for cleared pixels.
pub const CLEARED: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Whether every color channel of `pixel` is strictly above `threshold`.
///
/// Alpha is ignored: a near-white pixel counts as background even when it
/// was already transparent or fully opaque.
#[inline]
#[must_use]
pub fn is_near_white(pixel: &Rgba<u8>, threshold: u8) -> bool {
    pixel[0] > threshold && pixel[1] > threshold && pixel[2] > threshold
}

/// Make every near-white pixel fully transparent, in place.
///
/// Returns the number of cleared pixels.
pub fn strip_background(img: &mut RgbaImage, threshold: u8) -> usize {
    let mut cleared = 0;

    for pixel in img.pixels_mut() {
        if is_near_white(pixel, threshold) {
            *pixel = CLEARED;
            cleared += 1;
        }
    }

    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_near_white(&Rgba([230, 255, 255, 255]), 230));
        assert!(is_near_white(&Rgba([231, 231, 231, 255]), 230));
    }

    #[test]
    fn test_inclusive_cutoff_is_one_lower() {
        // Clearing every channel >= 235 needs threshold 234
        let edge = Rgba([235, 235, 235, 255]);
        assert!(is_near_white(&edge, 234));
        assert!(!is_near_white(&edge, 235));
        assert!(!is_near_white(&Rgba([234, 255, 255, 255]), 234));
    }

    #[test]
    fn test_any_dark_channel_keeps_pixel() {
        assert!(!is_near_white(&Rgba([255, 255, 40, 255]), 230));
        assert!(!is_near_white(&Rgba([0, 255, 255, 0]), 230));
    }

    #[test]
    fn test_strip_background_clears_only_near_white() {
        let mut img = RgbaImage::from_fn(4, 1, |x, _| match x {
            0 => Rgba([245, 245, 245, 255]),
            1 => Rgba([20, 40, 200, 255]),
            2 => Rgba([240, 240, 240, 10]),
            _ => Rgba([235, 100, 235, 255]),
        });

        let cleared = strip_background(&mut img, 230);

        assert_eq!(cleared, 2);
        assert_eq!(*img.get_pixel(0, 0), CLEARED);
        assert_eq!(*img.get_pixel(1, 0), Rgba([20, 40, 200, 255]));
        assert_eq!(*img.get_pixel(2, 0), CLEARED);
        assert_eq!(*img.get_pixel(3, 0), Rgba([235, 100, 235, 255]));
    }

    #[test]
    fn test_max_threshold_clears_nothing() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
        assert_eq!(strip_background(&mut img, u8::MAX), 0);
    }
}
