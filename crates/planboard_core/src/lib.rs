//! Planboard core: session state machine, translation catalog and list reconciler.
mod catalog;
mod effect;
mod labels;
mod locale;
mod msg;
mod project;
mod reconcile;
mod state;
mod update;
mod view_model;

pub use catalog::{format_positional, Catalog};
pub use effect::Effect;
pub use labels::{TaskPriority, TaskStatus};
pub use locale::{format_date, time_ago, Locale, LocalePack};
pub use msg::Msg;
pub use project::{project_route, GroupId, ProjectCache, ProjectId, ProjectRecord};
pub use reconcile::{on_entity_deleted, EntityDeleted};
pub use state::{AppState, CatalogOrigin, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, ProjectRowView};
