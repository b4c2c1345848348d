//! Planboard engine: server fetches, push decoding and snapshot persistence.
mod engine;
mod fetch;
mod loader;
mod persist;
mod retry;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use fetch::{CatalogSource, FetchSettings, ProjectSource, ReqwestSource};
pub use loader::CatalogLoader;
pub use persist::{ensure_cache_dir, PersistError, SnapshotStore};
pub use retry::RetryPolicy;
pub use types::{CatalogLoad, CatalogPayload, EngineEvent, FailureKind, FetchError, LoadOutcome};
pub use wire::{decode_catalog, decode_projects, decode_push};
