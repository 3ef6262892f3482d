//! Image loading and saving utilities.

mod load;
mod save;

pub use load::load_image;
pub use save::{save_png, Compression};

/// Icon canvas edge used by Expo and most app stores.
pub const ICON_SIZE: u32 = 1024;
