//! Bounding box of visible content.

use image::{imageops, RgbaImage};

/// Axis-aligned rectangle in pixel coordinates.
///
/// `right` and `bottom` are exclusive, so `width = right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Find the smallest box containing every pixel with non-zero alpha.
///
/// Returns `None` if the image is fully transparent (or empty).
#[must_use]
pub fn bounding_box(img: &RgbaImage) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }

        let b = bbox.get_or_insert(BoundingBox {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        });
        b.left = b.left.min(x);
        b.top = b.top.min(y);
        b.right = b.right.max(x + 1);
        b.bottom = b.bottom.max(y + 1);
    }

    bbox
}

/// Copy the region inside `bbox` into a new image.
#[must_use]
pub fn crop_to(img: &RgbaImage, bbox: BoundingBox) -> RgbaImage {
    imageops::crop_imm(img, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image()
}
