//! Run orchestrator for one freshness check
//!
//! This module provides:
//! - Workflow coordination: parse manifest → scope by prefix → resolve → report
//! - Version source selection from the run configuration
//! - Warning-level logging of modules that could not be resolved

use crate::config::Config;
use crate::domain::Report;
use crate::error::AppError;
use crate::manifest::{parse_manifest, ManifestInfo};
use crate::progress::Progress;
use crate::resolver::Resolver;
use crate::source::{create_source, VersionSource};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrator for one check run
pub struct Orchestrator {
    config: Config,
    manifest: ManifestInfo,
    source: Arc<dyn VersionSource>,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// The manifest that was checked
    pub manifest: ManifestInfo,
    /// Requirements declared before prefix filtering
    pub declared: usize,
    /// Classified requirements in declaration order
    pub report: Report,
}

impl Orchestrator {
    /// Create an orchestrator using the source selected by `config`
    pub fn new(config: Config, manifest: ManifestInfo) -> Result<Self, AppError> {
        config.validate()?;
        let source = create_source(&config)?;
        Ok(Self {
            config,
            manifest,
            source,
        })
    }

    /// Create an orchestrator with a custom version source (for testing)
    pub fn with_source(
        config: Config,
        manifest: ManifestInfo,
        source: Arc<dyn VersionSource>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            config,
            manifest,
            source,
        })
    }

    /// Run the check without progress display
    pub async fn run(&self) -> Result<OrchestratorResult, AppError> {
        self.run_with_progress(false).await
    }

    /// Run the check with optional progress display
    ///
    /// Only manifest errors abort the run; per-module failures end up as
    /// unresolvable rows in the report.
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<OrchestratorResult, AppError> {
        let declared = parse_manifest(&self.manifest)?;
        let requirements = declared.filter(&self.config.module_prefix);

        info!(
            "checking {} of {} requirements in {} via {}",
            requirements.len(),
            declared.len(),
            self.manifest.path.display(),
            self.source.name()
        );
        if !self.config.module_prefix.is_empty() {
            debug!("module prefix: {}", self.config.module_prefix);
        }

        let mut progress = Progress::new(show_progress);
        progress.start(requirements.len() as u64, "Resolving modules");

        let resolver = Resolver::new(self.config.resolver_config());
        let report = resolver
            .run_with_progress(&requirements, Arc::clone(&self.source), &progress)
            .await;

        progress.finish_and_clear();

        for row in report.unresolvable() {
            warn!(
                "{}@{}: {}",
                row.requirement.path, row.requirement.pinned_version, row.classification
            );
        }

        Ok(OrchestratorResult {
            manifest: self.manifest.clone(),
            declared: declared.len(),
            report,
        })
    }
}
