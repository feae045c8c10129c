//! Pipeline orchestrator: fetch → extract → bounded-parallel bucketize.
//!
//! Sources are fetched sequentially into a per-run scratch directory;
//! individual source failures are logged and tolerated. The extracted
//! country universe then fans out into one bucket task per country, bounded
//! by a counting semaphore. Task failures are collected, never fatal: the
//! run reaches its final summary as long as at least one source was fetched
//! and the extraction scan succeeded.

use crate::bucket::write_country;
use crate::catalog::RegistryCatalog;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::extract::country_universe;
use crate::fetch::Fetcher;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Aggregate outcome of one pipeline run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Names of the sources that were fetched successfully
    pub sources: Vec<String>,
    /// Number of country buckets produced
    pub countries: usize,
    /// Every contained per-country failure, in completion order
    pub errors: Vec<String>,
    /// Where the per-country artifacts were written
    pub output_dir: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sources fetched: {}", self.sources.join(", "))?;
        writeln!(
            f,
            "generated {} country folders under {}",
            self.countries,
            self.output_dir.display()
        )?;
        if self.errors.is_empty() {
            write!(f, "no errors")
        } else {
            writeln!(f, "{} errors:", self.errors.len())?;
            for (i, err) in self.errors.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, " - {err}")?;
            }
            Ok(())
        }
    }
}

/// Top-level pipeline coordinator.
pub struct Pipeline {
    config: PipelineConfig,
    catalog: RegistryCatalog,
}

impl Pipeline {
    /// Build a pipeline over the given configuration and catalog.
    pub fn new(config: PipelineConfig, catalog: RegistryCatalog) -> Self {
        Self { config, catalog }
    }

    /// Run the full pipeline and return the aggregated summary.
    ///
    /// # Errors
    ///
    /// Fails only when no source could be fetched ([`Error::NoSources`]),
    /// when the country-universe scan fails, or when the output or scratch
    /// directories cannot be created. Per-country failures are collected
    /// into the summary instead.
    pub async fn run(&self) -> Result<RunSummary> {
        let fetcher = Fetcher::new(self.config.fetch_timeout)?;

        // Raw files live here and are deleted with the directory on drop.
        let scratch = tempfile::tempdir()?;
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let (raw_files, sources) = self.fetch_sources(&fetcher, scratch.path()).await;
        if raw_files.is_empty() {
            return Err(Error::NoSources);
        }

        let countries = country_universe(&raw_files, &self.catalog)?;
        info!(countries = countries.len(), "extracted country universe");

        let (produced, errors) = self.bucketize(countries, raw_files).await;

        Ok(RunSummary {
            sources,
            countries: produced,
            errors,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Fetch every configured source sequentially, dropping failures.
    async fn fetch_sources(
        &self,
        fetcher: &Fetcher,
        scratch: &std::path::Path,
    ) -> (Vec<PathBuf>, Vec<String>) {
        let mut raw_files = Vec::new();
        let mut fetched = Vec::new();

        for source in &self.config.sources {
            info!(source = %source.name, "fetching delegation data");
            let result = if source.probe_by_date {
                fetcher.fetch_dated(source, scratch).await
            } else {
                fetcher.fetch(&source.url, scratch).await
            };

            match result {
                Ok(path) => {
                    raw_files.push(path);
                    fetched.push(source.name.clone());
                }
                Err(err) => {
                    warn!(source = %source.name, error = %err, "source dropped, continuing");
                }
            }
        }

        (raw_files, fetched)
    }

    /// Fan the country universe out into bounded-parallel bucket tasks.
    ///
    /// Returns (buckets produced, collected failures). Every spawned task is
    /// joined before returning so no failure is dropped.
    async fn bucketize(
        &self,
        countries: Vec<String>,
        raw_files: Vec<PathBuf>,
    ) -> (usize, Vec<String>) {
        let limit = self.config.max_concurrent_countries.max(1);
        let admission = Arc::new(Semaphore::new(limit));
        let raw_files = Arc::new(raw_files);
        let total = countries.len();

        let mut tasks = JoinSet::new();
        for (index, cc) in countries.into_iter().enumerate() {
            // A task may start only when a slot is free; the permit travels
            // into the closure and frees the slot whatever the outcome.
            let permit = match admission.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let raw_files = Arc::clone(&raw_files);
            let catalog = self.catalog.clone();
            let output_dir = self.config.output_dir.clone();
            tasks.spawn_blocking(move || {
                let _permit = permit;
                info!(country = %cc, index = index + 1, total, "bucketizing");
                write_country(&cc, &raw_files, &output_dir, &catalog)
            });
        }

        let mut produced = 0;
        let mut errors = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => produced += 1,
                Ok(Err(err)) => errors.push(err.to_string()),
                Err(join_err) => errors.push(format!("bucket task panicked: {join_err}")),
            }
        }

        (produced, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceDescriptor;

    #[tokio::test]
    async fn run_fails_when_every_source_is_unreachable() {
        let config = PipelineConfig {
            output_dir: tempfile::tempdir().unwrap().keep(),
            fetch_timeout: std::time::Duration::from_millis(50),
            sources: vec![SourceDescriptor::fixed(
                "unreachable",
                "http://127.0.0.1:1/delegated-latest",
            )],
            ..Default::default()
        };
        let pipeline = Pipeline::new(config, RegistryCatalog::builtin());

        assert!(matches!(pipeline.run().await, Err(Error::NoSources)));
    }

    #[test]
    fn summary_display_enumerates_errors() {
        let summary = RunSummary {
            sources: vec!["APNIC".into(), "ARIN".into()],
            countries: 2,
            errors: vec!["bucket for JP failed: disk full".into()],
            output_dir: PathBuf::from("data"),
        };
        let text = summary.to_string();
        assert!(text.contains("APNIC, ARIN"));
        assert!(text.contains("generated 2 country folders"));
        assert!(text.contains(" - bucket for JP failed: disk full"));
    }

    #[test]
    fn summary_display_without_errors() {
        let summary = RunSummary {
            sources: vec!["LACNIC".into()],
            countries: 1,
            errors: vec![],
            output_dir: PathBuf::from("data"),
        };
        assert!(summary.to_string().contains("no errors"));
    }
}
