use crate::{Catalog, EntityDeleted, ProjectRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page loaded at `path`; opens the session.
    SessionStarted { path: String },
    /// Catalog read back from the last snapshot, ahead of the live fetch.
    CatalogRestored {
        catalog: Catalog,
        language: Option<String>,
    },
    /// Live catalog fetch succeeded.
    CatalogLoaded {
        catalog: Catalog,
        language: Option<String>,
    },
    /// Live catalog fetch gave up after its retry budget.
    CatalogUnavailable,
    /// Project list read back from the last snapshot.
    ProjectsRestored(Vec<ProjectRecord>),
    /// Live project list fetch succeeded.
    ProjectsLoaded(Vec<ProjectRecord>),
    /// Push channel delivered an entity deletion.
    PushReceived(EntityDeleted),
    /// The page moved to `path`.
    Navigated(String),
    /// Page is going away; drops all session state.
    SessionEnded,
    /// Fallback for placeholder wiring.
    NoOp,
}
