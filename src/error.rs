//! Error types for packsmith operations.
//!
//! This module defines [`PacksmithError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PacksmithError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PacksmithError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for packsmith operations.
#[derive(Debug, Error)]
pub enum PacksmithError {
    /// Repository reference matched none of the supported shapes.
    #[error("Invalid repository reference: {reference}")]
    InvalidReference { reference: String },

    /// Reference points at a host with no registered URL pattern.
    #[error("Unknown repository host: {host}")]
    UnknownHost { host: String },

    /// Placeholder tokens and values were given in different numbers.
    #[error("Placeholder arity mismatch: {tokens} tokens but {values} values")]
    MismatchedArity { tokens: usize, values: usize },

    /// Vendor or package name failed validation.
    #[error("Invalid name '{name}'")]
    InvalidName { name: String },

    /// The package directory is already present.
    #[error("Package already exists at {path}")]
    PackageExists { path: PathBuf },

    /// The package directory does not exist.
    #[error("Package not found at {path}")]
    PackageNotFound { path: PathBuf },

    /// The skeleton's rename manifest could not be applied.
    #[error("Invalid rename manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// Downloading, cloning or extracting failed.
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Editing the dependency manifest or running the installer failed.
    #[error("Failed to install {package}: {message}")]
    Install { package: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A prompt had no answer and the UI cannot ask.
    #[error("Cannot prompt for '{key}' in non-interactive mode (no default value)")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for packsmith operations.
pub type Result<T> = std::result::Result<T, PacksmithError>;
