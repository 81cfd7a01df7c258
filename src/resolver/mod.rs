//! Freshness resolution for declared requirements
//!
//! This module provides:
//! - Classification of one requirement against a candidate tag set
//! - Deterministic selection of the highest candidate
//! - Concurrent resolution of a whole RequirementSet with a worker limit and a
//!   per-fetch timeout, reassembled in declaration order

use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use crate::domain::{
    normalize, Classification, Report, Requirement, SemanticVersion, UnresolvableReason,
};
use crate::error::SourceError;
use crate::manifest::RequirementSet;
use crate::progress::Progress;
use crate::source::VersionSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of fetches in flight
    pub concurrency: usize,
    /// Deadline for a single fetch
    pub timeout: Duration,
    /// Whether pre-release candidates may be selected for a release pin
    pub include_prerelease: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            include_prerelease: true,
        }
    }
}

/// Classifies requirements against a version source
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a new resolver
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolver settings
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Fetch candidates for one requirement and classify it
    pub async fn resolve(&self, req: &Requirement, source: &dyn VersionSource) -> Classification {
        let fetched = match tokio::time::timeout(self.config.timeout, source.fetch(&req.path)).await
        {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(e)) => {
                return Classification::unresolvable(UnresolvableReason::FetchFailed(e.to_string()))
            }
            Err(_) => {
                let e = SourceError::timeout(&req.path, self.config.timeout.as_secs());
                return Classification::unresolvable(UnresolvableReason::FetchFailed(e.to_string()));
            }
        };

        self.classify(req, fetched)
    }

    /// Classify a requirement against raw candidate strings
    ///
    /// Candidates that fail normalization are dropped silently; an invalid
    /// pin is reported rather than skipped.
    pub fn classify<I, S>(&self, req: &Requirement, candidates: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pinned = match req.pinned() {
            Ok(v) => v,
            Err(e) => {
                return Classification::unresolvable(UnresolvableReason::InvalidPinnedVersion(
                    e.raw().to_string(),
                ))
            }
        };

        let allow_prerelease = self.config.include_prerelease || pinned.is_prerelease();
        let valid: Vec<SemanticVersion> = candidates
            .into_iter()
            .filter_map(|raw| normalize(raw.as_ref()).ok())
            .collect();
        if valid.is_empty() {
            return Classification::unresolvable(UnresolvableReason::NoValidVersionsFound);
        }

        let eligible: Vec<SemanticVersion> = valid
            .into_iter()
            .filter(|v| allow_prerelease || !v.is_prerelease())
            .collect();

        let Some(latest) = select_latest(eligible) else {
            return Classification::unresolvable(UnresolvableReason::NoStableVersionsFound);
        };

        debug!("{}: pinned {}, latest {}", req.path, pinned, latest);

        if latest > pinned {
            Classification::Outdated { latest }
        } else {
            Classification::UpToDate { latest }
        }
    }

    /// Resolve every requirement and build the report
    pub async fn run(&self, requirements: &RequirementSet, source: Arc<dyn VersionSource>) -> Report {
        self.run_with_progress(requirements, source, &Progress::disabled())
            .await
    }

    /// Resolve every requirement, advancing `progress` as fetches complete
    ///
    /// Fetches run concurrently up to the configured limit; the report keeps
    /// declaration order regardless of completion order.
    pub async fn run_with_progress(
        &self,
        requirements: &RequirementSet,
        source: Arc<dyn VersionSource>,
        progress: &Progress,
    ) -> Report {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, req) in requirements.iter().cloned().enumerate() {
            let resolver = self.clone();
            let source = Arc::clone(&source);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let classification = resolver.resolve(&req, source.as_ref()).await;
                (index, classification)
            });
        }

        let mut slots: Vec<Option<Classification>> = vec![None; requirements.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, classification)) => {
                    if let Some(req) = requirements.requirements().get(index) {
                        progress.set_message(&req.path);
                    }
                    slots[index] = Some(classification);
                }
                Err(e) => warn!("resolver task failed: {}", e),
            }
            progress.inc();
        }

        Report::build(requirements.iter().cloned().zip(slots).map(|(req, slot)| {
            let classification = slot.unwrap_or_else(|| {
                Classification::unresolvable(UnresolvableReason::FetchFailed(
                    "resolver task aborted".to_string(),
                ))
            });
            (req, classification)
        }))
    }
}

/// Highest candidate under semantic-version precedence
///
/// Candidates of equal precedence are ordered by build metadata before the
/// last one is taken, so the winner does not depend on input order.
pub fn select_latest(mut candidates: Vec<SemanticVersion>) -> Option<SemanticVersion> {
    candidates.sort_by(|a, b| a.cmp_with_build(b));
    candidates.pop()
}
