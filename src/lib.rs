//! # `iconfit`
//!
//! Normalize app icons and splash artwork for mobile build pipelines.
//!
//! The core routine clears a near-white background, crops to the visible
//! content, scales it to a fraction of a fixed canvas while keeping its
//! aspect ratio, and centers it on a solid background color. The result is
//! an opaque PNG of exactly the requested size.
//!
//! ## Example
//!
//! ```no_run
//! use iconfit::{NormalizeConfig, Normalizer};
//!
//! # fn main() -> iconfit::Result<()> {
//! let config = NormalizeConfig {
//!     scale: 0.7,
//!     ..NormalizeConfig::default()
//! };
//! let normalizer = Normalizer::new(config)?;
//!
//! normalizer.process("assets/icon.png", "assets/splash-icon.png")?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod error;
pub mod image;
pub mod normalize;
pub mod optimize;

pub use batch::{expo_preset, load_manifest, run_batch, AssetJob, BatchReport};
pub use error::{Error, Result};
pub use normalize::{normalize, Color, NormalizeConfig, Normalizer, Size};
pub use optimize::{optimize, optimize_file, OptimizeOptions};
