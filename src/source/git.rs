//! Version source backed by `git ls-remote --tags`
//!
//! Each output line looks like `<sha>\trefs/tags/<tag>`; annotated tags
//! appear twice, once with the `^{}` peel marker. Tags are returned raw and
//! normalization strips the marker.
//!
//! A module path ending in a `/vN` major suffix (N >= 2) lives in the
//! repository without the suffix, and only `vN.*` tags belong to it. Paths
//! without a suffix own the v0 and v1 tags plus `+incompatible` ones. Vanity
//! import paths are cloned as-is, so they only resolve when the path is also a
//! git remote.

use crate::domain::normalize;
use crate::error::SourceError;
use crate::source::VersionSource;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Ref namespace holding tags
const TAG_REF_PREFIX: &str = "refs/tags/";

/// Default git executable
const DEFAULT_GIT: &str = "git";

/// Version source that lists remote tags with git
#[derive(Debug, Clone)]
pub struct GitTagSource {
    git: String,
}

impl GitTagSource {
    /// Create a source using `git` from PATH
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_GIT)
    }

    /// Create a source using a specific git executable
    pub fn with_binary(git: impl Into<String>) -> Self {
        Self { git: git.into() }
    }

    /// Remote URL for a module path. Paths that already name a remote
    /// (scheme, scp-style or local path) are passed through.
    pub fn repository_url(module: &str) -> String {
        if names_remote(module) {
            module.to_string()
        } else {
            format!("https://{}", split_major_suffix(module).0)
        }
    }

    /// Keep the tags that belong to the module's major version line.
    /// Unparsable tags are kept; the resolver drops them later.
    pub fn filter_major(module: &str, tags: BTreeSet<String>) -> BTreeSet<String> {
        let major = if names_remote(module) {
            None
        } else {
            split_major_suffix(module).1
        };

        tags.into_iter()
            .filter(|tag| match normalize(tag) {
                Err(_) => true,
                Ok(version) => match major {
                    Some(major) => version.major() == major,
                    None => version.major() <= 1 || tag.contains("+incompatible"),
                },
            })
            .collect()
    }

    /// Extract tag names from `git ls-remote --tags` output
    pub fn parse_ls_remote(output: &str) -> BTreeSet<String> {
        output
            .lines()
            .filter_map(|line| line.split_once(TAG_REF_PREFIX))
            .map(|(_, tag)| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn names_remote(module: &str) -> bool {
    module.contains("://")
        || module.starts_with("git@")
        || module.starts_with('/')
        || module.starts_with('.')
}

/// Split a trailing `/vN` major suffix (N >= 2) off a module path
pub fn split_major_suffix(module: &str) -> (&str, Option<u64>) {
    let Some((repo, last)) = module.rsplit_once('/') else {
        return (module, None);
    };
    let Some(digits) = last.strip_prefix('v') else {
        return (module, None);
    };
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (module, None);
    }

    match digits.parse::<u64>() {
        Ok(major) if major >= 2 => (repo, Some(major)),
        _ => (module, None),
    }
}

impl Default for GitTagSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionSource for GitTagSource {
    fn name(&self) -> &'static str {
        "git"
    }

    async fn fetch(&self, module: &str) -> Result<BTreeSet<String>, SourceError> {
        let url = Self::repository_url(module);
        debug!("running {} ls-remote --tags {}", self.git, url);

        let output = Command::new(&self.git)
            .args(["ls-remote", "--tags", &url])
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                SourceError::fetch_failed(module, self.name(), format!("failed to run {}: {}", self.git, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.contains("not found") {
                return Err(SourceError::not_found(module, self.name()));
            }
            return Err(SourceError::fetch_failed(
                module,
                self.name(),
                format!("{}: {}", output.status, stderr),
            ));
        }

        let tags = Self::filter_major(
            module,
            Self::parse_ls_remote(&String::from_utf8_lossy(&output.stdout)),
        );
        if tags.is_empty() {
            return Err(SourceError::empty(module, self.name()));
        }

        Ok(tags)
    }
}
