//! Icon normalization: strip a near-white background, crop to content,
//! rescale and recenter on a solid canvas.

mod background;
mod bbox;
mod compose;
mod config;
mod fit;
mod normalizer;

pub use background::{is_near_white, strip_background};
pub use bbox::{bounding_box, crop_to, BoundingBox};
pub use compose::{blend, center_offset, composite_centered, flatten, paste_masked};
pub use config::{Color, NormalizeConfig, Size, DEFAULT_SCALE, DEFAULT_THRESHOLD};
pub use fit::{fit_within, max_content_dim, resize_to_fit};
pub use normalizer::{normalize, Layout, Normalized, Normalizer};
