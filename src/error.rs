//! Domain-specific error types for the cleanup engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`StoreError`],
//! [`CleanupError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! CleanError
//! ├── Store(StoreError)     — registry reads and writes
//! ├── Input(InputError)     — marker ids, category token validation
//! └── Cleanup(CleanupError) — launching and waiting on cleanmgr
//! ```

use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the cleanup engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum CleanError {
    /// Volume cache store error (registry access, missing path).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid caller input (marker id out of range, unknown category token).
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Cleanup orchestration error (launch failure, poll failure, timeout).
    #[error("Cleanup error: {0}")]
    Cleanup(#[from] CleanupError),
}

/// Errors that arise from the volume cache configuration store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The caller lacks permission to read or write a registry key.
    #[error("access denied to {path}")]
    Access {
        /// Registry path that could not be accessed.
        path: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The volume caches path does not exist (e.g., unsupported OS version).
    #[error("registry path not found: {path}")]
    NotFound {
        /// Registry path that was expected to exist.
        path: String,
    },

    /// Any other I/O failure talking to the registry.
    #[error("registry error at {path}: {source}")]
    Io {
        /// Registry path involved in the failed operation.
        path: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The store is only available on Windows hosts.
    #[error("the volume cache store requires Windows")]
    Unsupported,
}

impl StoreError {
    /// Classify an [`std::io::Error`] returned by a registry operation on
    /// `path` into the matching store error variant.
    #[must_use]
    pub fn from_io(path: &str, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Self::Access {
                path: path.to_string(),
                source,
            },
            _ => Self::Io {
                path: path.to_string(),
                source,
            },
        }
    }

    /// Whether this error denotes a per-key permission problem.
    #[must_use]
    pub const fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }
}

/// Errors that arise from invalid caller input, reported before any write.
#[derive(Error, Debug)]
pub enum InputError {
    /// A marker id outside the `0..=9999` range.
    #[error("marker id {0} is out of range (expected 0-9999)")]
    MarkerOutOfRange(u32),

    /// A selection token that matches none of the selectable categories.
    #[error("unknown category token '{token}' (available: {available})")]
    UnknownCategory {
        /// The token that failed to match.
        token: String,
        /// Comma-separated list of selectable tokens.
        available: String,
    },
}

/// Errors that arise while orchestrating the external cleanup utility.
#[derive(Error, Debug)]
pub enum CleanupError {
    /// The cleanup utility failed to start.
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// Program that could not be started.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Querying the liveness of the running utility failed.
    #[error("failed to query cleanup process state: {0}")]
    Poll(#[source] std::io::Error),

    /// The utility did not exit within the configured wait limit.
    #[error("cleanup utility still running after {}s", waited.as_secs())]
    Timeout {
        /// How long the orchestrator waited before giving up.
        waited: Duration,
    },

    /// The system volume could not be identified for space measurement.
    #[error("unable to determine the system volume")]
    VolumeUnavailable,
}
