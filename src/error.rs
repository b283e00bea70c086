//! Unified error types for iceberg-matrix.
//!
//! Load-time faults abort snapshot construction; there is no partial or
//! degraded snapshot. Lookup misses and empty filter results are not errors
//! and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for iceberg-matrix operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MatrixError {
    /// Structural faults while loading a partition or the feature catalog
    #[error("Failed to load support data: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Data-integrity faults detected while aggregating partitions
    #[error("Support data integrity check failed: {context}")]
    Integrity {
        context: String,
        #[source]
        source: IntegrityErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Feature '{feature}' is introduced in unknown version '{version}'")]
    UnknownVersion { feature: String, version: String },

    #[error("Invalid identifier '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Malformed composite key '{0}' (expected platform:feature:version)")]
    InvalidKey(String),

    #[error("No data found: {0}")]
    Empty(String),
}

/// Specific integrity error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IntegrityErrorKind {
    #[error("Composite key '{key}' defined by both '{first}' and '{second}'")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },

    #[error("Platform id '{0}' is defined more than once")]
    DuplicatePlatform(String),

    #[error("Feature id '{0}' is defined more than once")]
    DuplicateFeature(String),

    #[error("Support entry '{key}' references unknown {kind} '{id}'")]
    OrphanEntry {
        key: String,
        kind: &'static str,
        id: String,
    },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for iceberg-matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl MatrixError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an integrity error with context
    pub fn integrity(context: impl Into<String>, source: IntegrityErrorKind) -> Self {
        Self::Integrity {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for MatrixError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for MatrixError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward-in, so a fault deep in partition loading
/// reads as `"loading data dir: reading platforms/aws.json: ..."`.
///
/// # Example
///
/// ```ignore
/// use iceberg_matrix::error::ErrorContext;
///
/// let catalog: FeatureCatalog = serde_json::from_str(&raw)
///     .with_context(|| format!("parsing {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<MatrixError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: MatrixError, new_ctx: &str) -> MatrixError {
    match err {
        MatrixError::Load {
            context: existing,
            source,
        } => MatrixError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MatrixError::Integrity {
            context: existing,
            source,
        } => MatrixError::Integrity {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MatrixError::Io {
            path,
            message,
            source,
        } => MatrixError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
