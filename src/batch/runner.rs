//! Sequential job execution.

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Error;
use crate::normalize::Normalizer;

use super::AssetJob;

/// A job that did not complete.
#[derive(Debug)]
pub struct JobFailure {
    pub name: String,
    pub error: Error,
}

/// Outcome of [`run_batch`].
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failures: Vec<JobFailure>,
}

impl BatchReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every job in order.
///
/// A failing job is logged and recorded; the remaining jobs still run.
/// Each job reads its source when it starts, so a job can consume the
/// output of an earlier one.
#[must_use]
pub fn run_batch(jobs: &[AssetJob]) -> BatchReport {
    let mut report = BatchReport::default();

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Normalizing [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for job in jobs {
        pb.set_message(job.name.clone());

        let result = Normalizer::new(job.config)
            .and_then(|normalizer| normalizer.process(&job.source, &job.destination));

        match result {
            Ok(layout) => {
                tracing::debug!("Job {} done: {layout:?}", job.name);
                report.succeeded += 1;
            }
            Err(error) => {
                tracing::warn!("Skipping {}: {error}", job.name);
                report.failures.push(JobFailure {
                    name: job.name.clone(),
                    error,
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message(format!(
        "{} succeeded, {} failed",
        report.succeeded,
        report.failures.len()
    ));

    report
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::{GenericImageView, Rgba, RgbaImage};

    use super::*;
    use crate::batch::expo_preset;
    use crate::image::load_image;

    fn write_logo(path: &Path) {
        RgbaImage::from_fn(300, 300, |x, y| {
            if (100..200).contains(&x) && (125..175).contains(&y) {
                Rgba([200, 30, 30, 255])
            } else {
                Rgba([245, 245, 245, 255])
            }
        })
        .save(path)
        .unwrap();
    }

    #[test]
    fn test_expo_preset_runs() {
        let dir = tempfile::tempdir().unwrap();
        write_logo(&dir.path().join("icon.png"));

        let report = run_batch(&expo_preset(dir.path()));

        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(report.succeeded, 3);
        for name in ["icon", "adaptive-icon", "splash-icon"] {
            let img = load_image(dir.path().join(format!("{name}.png"))).unwrap();
            assert_eq!(img.dimensions(), (1024, 1024));
        }
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_logo(&dir.path().join("logo.png"));

        let job = |name: &str, source: &str| AssetJob {
            name: name.to_string(),
            source: dir.path().join(source),
            destination: dir.path().join(format!("{name}.png")),
            config: crate::normalize::NormalizeConfig::default(),
        };
        let jobs = [job("missing", "nope.png"), job("ok", "logo.png")];

        let report = run_batch(&jobs);

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "missing");
        assert!(matches!(report.failures[0].error, Error::ImageLoad { .. }));
        assert!(dir.path().join("ok.png").exists());
    }
}
