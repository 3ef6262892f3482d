//! Named normalization jobs run one after another.
//!
//! Jobs come from a TOML manifest ([`load_manifest`]) or from the built-in
//! Expo preset ([`expo_preset`]).

mod manifest;
mod runner;

use std::path::{Path, PathBuf};

pub use manifest::{load_manifest, parse_manifest};
pub use runner::{run_batch, BatchReport, JobFailure};

use crate::normalize::NormalizeConfig;

/// One source-to-destination normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetJob {
    /// Label used in logs and failure reports.
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub config: NormalizeConfig,
}

/// Icon, adaptive icon and splash icon of an Expo app, all derived from
/// `icon.png` in `assets_dir`.
///
/// The icon is rewritten in place first, so the later jobs read the
/// normalized icon.
#[must_use]
pub fn expo_preset(assets_dir: &Path) -> Vec<AssetJob> {
    let source = assets_dir.join("icon.png");
    let job = |name: &str, scale: f64| AssetJob {
        name: name.to_string(),
        source: source.clone(),
        destination: assets_dir.join(format!("{name}.png")),
        config: NormalizeConfig {
            scale,
            ..NormalizeConfig::default()
        },
    };

    vec![
        job("icon", 0.85),
        job("adaptive-icon", 0.85),
        job("splash-icon", 0.7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expo_preset() {
        let jobs = expo_preset(Path::new("assets"));

        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["icon", "adaptive-icon", "splash-icon"]);
        assert!(jobs.iter().all(|j| j.source == Path::new("assets/icon.png")));
        assert_eq!(jobs[0].destination, Path::new("assets/icon.png"));
        assert_eq!(jobs[2].destination, Path::new("assets/splash-icon.png"));
        assert!((jobs[2].config.scale - 0.7).abs() < f64::EPSILON);
        assert!(jobs.iter().all(|j| j.config.validate().is_ok()));
    }
}
