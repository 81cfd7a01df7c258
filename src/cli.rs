//! CLI argument parsing module for outdatedcheck

use crate::config::Config;
use crate::error::ConfigError;
use crate::output::{OutputConfig, OutputFormat, Verbosity};
use crate::source::SourceKind;
use clap::Parser;
use std::path::PathBuf;

/// Report Go module requirements that lag behind their latest tagged release
#[derive(Parser, Debug, Clone)]
#[command(name = "outdatedcheck", version, about)]
pub struct CliArgs {
    /// Project directory or manifest file (go.mod, or `go list -m -json` output ending in .json)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Only check modules whose path starts with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Where candidate versions come from
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// JSON tag table used by `--source file` (implies it when --source is absent)
    #[arg(long, value_name = "FILE")]
    pub tags_file: Option<PathBuf>,

    /// Go module proxy base URL (implies `--source proxy` when --source is absent)
    #[arg(long, value_name = "URL")]
    pub proxy_url: Option<String>,

    /// Maximum number of concurrent fetches
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-module fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file (default: .outdatedcheck.toml next to the manifest)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Shorthand for `--format json`
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    /// Never report pre-release tags as latest for a release pin
    #[arg(long)]
    pub stable_only: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output and debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Print the verdict only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CliArgs {
    /// Effective output format
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }

    /// Output configuration from the flags
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(
            self.output_format(),
            Verbosity::from_flags(self.verbose, self.quiet),
            !self.no_color,
        )
    }

    /// Default log filter when RUST_LOG is unset
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// Overlay command-line values on a loaded configuration
    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(prefix) = &self.prefix {
            config.module_prefix = prefix.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.stable_only {
            config.include_prerelease = false;
        }

        let implied = match (&self.tags_file, &self.proxy_url) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingOptions {
                    message: "--tags-file and --proxy-url select different sources".to_string(),
                })
            }
            (Some(_), None) => Some(SourceKind::File),
            (None, Some(_)) => Some(SourceKind::Proxy),
            (None, None) => None,
        };

        match (self.source, implied) {
            (Some(explicit), Some(implied)) if explicit != implied => {
                return Err(ConfigError::ConflictingOptions {
                    message: format!("--source {} cannot be combined with options for {}", explicit, implied),
                });
            }
            (Some(kind), _) | (None, Some(kind)) => config.source = kind,
            (None, None) => {}
        }

        if let Some(tags_file) = &self.tags_file {
            config.tags_file = Some(tags_file.clone());
        }
        if let Some(proxy_url) = &self.proxy_url {
            config.proxy_url = Some(proxy_url.clone());
        }

        Ok(config)
    }
}
