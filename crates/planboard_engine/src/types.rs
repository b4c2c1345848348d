use std::fmt;

use planboard_core::{Catalog, ProjectRecord};

/// A decoded catalog response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogPayload {
    pub catalog: Catalog,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { attempts: u32 },
    Exhausted { attempts: u32, last_error: FetchError },
}

/// Result of a catalog load. Never an error: exhaustion yields an empty catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub language: Option<String>,
    pub outcome: LoadOutcome,
}

impl CatalogLoad {
    pub(crate) fn loaded(payload: CatalogPayload, attempts: u32) -> Self {
        Self {
            catalog: payload.catalog,
            language: payload.language,
            outcome: LoadOutcome::Loaded { attempts },
        }
    }

    pub(crate) fn exhausted(attempts: u32, last_error: FetchError) -> Self {
        Self {
            catalog: Catalog::new(),
            language: None,
            outcome: LoadOutcome::Exhausted {
                attempts,
                last_error,
            },
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Exhausted { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self.outcome {
            LoadOutcome::Loaded { attempts } | LoadOutcome::Exhausted { attempts, .. } => attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CatalogLoaded(CatalogLoad),
    ProjectsLoaded(Result<Vec<ProjectRecord>, FetchError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    /// The fetch task stopped before producing a result.
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Aborted => write!(f, "fetch aborted"),
        }
    }
}
