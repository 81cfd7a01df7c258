//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: A version string fails the semantic-version grammar
//! - SourceError: A version source could not answer for a module
//! - ManifestError: Requirement declarations could not be read or parsed
//! - ConfigError: Invalid configuration file or CLI combination

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version source related errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors produced while normalizing a version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The string is not a semantic version, even after normalization
    #[error("invalid version '{raw}'")]
    InvalidVersion { raw: String },
}

/// Errors related to fetching candidate versions for a module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing system does not know the module
    #[error("module '{module}' not found in {source_name}")]
    ModuleNotFound { module: String, source_name: String },

    /// The backing system answered but listed no tags
    #[error("{source_name} returned no versions for '{module}'")]
    EmptyResponse { module: String, source_name: String },

    /// Process or network failure
    #[error("failed to fetch '{module}' from {source_name}: {message}")]
    FetchFailed {
        module: String,
        source_name: String,
        message: String,
    },

    /// The fetch did not complete within the configured deadline
    #[error("timeout after {seconds}s while fetching '{module}'")]
    Timeout { module: String, seconds: u64 },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No manifest could be located
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requirement declarations are structurally unreadable
    #[error("failed to parse {origin} at line {line}: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A setting has a value outside its allowed range
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl VersionError {
    /// Creates a new InvalidVersion error
    pub fn invalid(raw: impl Into<String>) -> Self {
        VersionError::InvalidVersion { raw: raw.into() }
    }

    /// Returns the string that failed to parse
    pub fn raw(&self) -> &str {
        match self {
            VersionError::InvalidVersion { raw } => raw,
        }
    }
}

impl SourceError {
    /// Creates a new ModuleNotFound error
    pub fn not_found(module: impl Into<String>, source_name: impl Into<String>) -> Self {
        SourceError::ModuleNotFound {
            module: module.into(),
            source_name: source_name.into(),
        }
    }

    /// Creates a new EmptyResponse error
    pub fn empty(module: impl Into<String>, source_name: impl Into<String>) -> Self {
        SourceError::EmptyResponse {
            module: module.into(),
            source_name: source_name.into(),
        }
    }

    /// Creates a new FetchFailed error
    pub fn fetch_failed(
        module: impl Into<String>,
        source_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        SourceError::FetchFailed {
            module: module.into(),
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(module: impl Into<String>, seconds: u64) -> Self {
        SourceError::Timeout {
            module: module.into(),
            seconds,
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(origin: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            origin: origin.into(),
            line,
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidValue error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
