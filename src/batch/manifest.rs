//! TOML asset manifests.
//!
//! ```toml
//! [defaults]
//! target = [1024, 1024]
//! scale = 0.85
//! threshold = 230
//! background = "#F5F5F5"
//!
//! [[asset]]
//! source = "icon.png"
//! destination = "splash-icon.png"
//! scale = 0.7
//! ```
//!
//! Relative paths resolve against the manifest's directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::normalize::{Color, NormalizeConfig, Size};

use super::AssetJob;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    defaults: Overrides,

    #[serde(default, rename = "asset")]
    assets: Vec<AssetEntry>,
}

/// Optional per-field overrides of [`NormalizeConfig`].
#[derive(Debug, Default, Deserialize)]
struct Overrides {
    target: Option<Size>,
    scale: Option<f64>,
    threshold: Option<u8>,
    background: Option<Color>,
}

impl Overrides {
    fn apply(&self, base: NormalizeConfig) -> NormalizeConfig {
        NormalizeConfig {
            target: self.target.unwrap_or(base.target),
            scale: self.scale.unwrap_or(base.scale),
            threshold: self.threshold.unwrap_or(base.threshold),
            background: self.background.unwrap_or(base.background),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    name: Option<String>,
    source: PathBuf,
    destination: PathBuf,

    #[serde(flatten)]
    overrides: Overrides,
}

/// Read and resolve a manifest file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid manifest,
/// or any job has an invalid configuration.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<AssetJob>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let manifest: Manifest = toml::from_str(&text).map_err(|source| Error::Manifest {
        path: path.to_path_buf(),
        source,
    })?;

    resolve(manifest, base_dir)
}

/// Parse manifest text, resolving relative paths against `base_dir`.
///
/// # Errors
///
/// Returns an error if the text is not a valid manifest or any job has an
/// invalid configuration.
pub fn parse_manifest(text: &str, base_dir: &Path) -> Result<Vec<AssetJob>> {
    let manifest: Manifest = toml::from_str(text).map_err(|source| Error::Manifest {
        path: base_dir.to_path_buf(),
        source,
    })?;

    resolve(manifest, base_dir)
}

fn resolve(manifest: Manifest, base_dir: &Path) -> Result<Vec<AssetJob>> {
    let defaults = manifest.defaults.apply(NormalizeConfig::default());

    manifest
        .assets
        .into_iter()
        .map(|entry| -> Result<AssetJob> {
            let name = entry.name.unwrap_or_else(|| {
                entry
                    .destination
                    .file_stem()
                    .map_or_else(String::new, |s| s.to_string_lossy().into_owned())
            });

            let config = entry.overrides.apply(defaults);
            config.validate().map_err(|err| match err {
                Error::InvalidParameter { name: field, reason } => Error::InvalidParameter {
                    name: format!("{name}.{field}"),
                    reason,
                },
                other => other,
            })?;

            Ok(AssetJob {
                name,
                source: base_dir.join(entry.source),
                destination: base_dir.join(entry.destination),
                config,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r##"
[defaults]
scale = 0.88
background = "#FFFFFF"

[[asset]]
source = "icon.png"
destination = "icon.png"

[[asset]]
name = "splash"
source = "icon.png"
destination = "out/splash-icon.png"
scale = 0.75
threshold = 235
target = [1284, 2778]
"##;

    #[test]
    fn test_parse_manifest() {
        let jobs = parse_manifest(MANIFEST, Path::new("mobile/assets")).unwrap();

        assert_eq!(jobs.len(), 2);

        assert_eq!(jobs[0].name, "icon");
        assert_eq!(jobs[0].source, Path::new("mobile/assets/icon.png"));
        assert!((jobs[0].config.scale - 0.88).abs() < f64::EPSILON);
        assert_eq!(jobs[0].config.background, Color::WHITE);
        assert_eq!(jobs[0].config.threshold, 230);
        assert_eq!(jobs[0].config.target, Size::square(1024));

        assert_eq!(jobs[1].name, "splash");
        assert_eq!(jobs[1].destination, Path::new("mobile/assets/out/splash-icon.png"));
        assert!((jobs[1].config.scale - 0.75).abs() < f64::EPSILON);
        assert_eq!(jobs[1].config.threshold, 235);
        assert_eq!(jobs[1].config.target, Size::new(1284, 2778));
        assert_eq!(jobs[1].config.background, Color::WHITE);
    }

    #[test]
    fn test_absolute_paths_kept() {
        let text = "[[asset]]\nsource = \"/abs/in.png\"\ndestination = \"/abs/out.png\"\n";
        let jobs = parse_manifest(text, Path::new("base")).unwrap();
        assert_eq!(jobs[0].source, Path::new("/abs/in.png"));
        assert_eq!(jobs[0].name, "out");
    }

    #[test]
    fn test_empty_manifest() {
        assert!(parse_manifest("", Path::new(".")).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_scale_names_job() {
        let text = "[[asset]]\nname = \"splash\"\nsource = \"a.png\"\ndestination = \"b.png\"\nscale = 1.5\n";
        let err = parse_manifest(text, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("splash.scale"), "{err}");
    }

    #[test]
    fn test_bad_color_rejected() {
        let text = "[defaults]\nbackground = \"salmon\"\n";
        let err = parse_manifest(text, Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = parse_manifest("[asset_defaults]\nscale = 0.5\n", Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn test_load_manifest_resolves_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.toml");
        std::fs::write(&path, MANIFEST).unwrap();

        let jobs = load_manifest(&path).unwrap();
        assert_eq!(jobs[0].source, dir.path().join("icon.png"));
    }
}
