use std::sync::Arc;
use std::time::Duration;

use planboard_core::{Catalog, ProjectRecord};
use planboard_engine::{
    CatalogLoader, CatalogPayload, CatalogSource, EngineEvent, EngineHandle, FailureKind,
    FetchError, ProjectSource, RetryPolicy,
};

struct Fixed;

#[async_trait::async_trait]
impl CatalogSource for Fixed {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, FetchError> {
        Ok(CatalogPayload {
            catalog: Catalog::from_entries([("Done", "Fertig")]),
            language: Some("de".to_string()),
        })
    }
}

#[async_trait::async_trait]
impl ProjectSource for Fixed {
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, FetchError> {
        Err(FetchError {
            kind: FailureKind::HttpStatus(403),
            message: "forbidden".to_string(),
        })
    }
}

fn wait_for(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn engine_reports_catalog_and_project_results() {
    let source = Arc::new(Fixed);
    let loader = CatalogLoader::new(source.clone(), RetryPolicy::default());
    let engine = EngineHandle::with_sources(loader, source).expect("engine");

    engine.load_catalog();
    match wait_for(&engine) {
        EngineEvent::CatalogLoaded(load) => {
            assert_eq!(load.attempts(), 1);
            assert_eq!(load.language.as_deref(), Some("de"));
            assert_eq!(load.catalog.translate("Done", &[], None), "Fertig");
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.load_projects();
    match wait_for(&engine) {
        EngineEvent::ProjectsLoaded(Err(err)) => {
            assert_eq!(err.kind, FailureKind::HttpStatus(403));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(engine.try_recv().is_none());
}

struct Crashing;

#[async_trait::async_trait]
impl CatalogSource for Crashing {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, FetchError> {
        panic!("catalog source crashed");
    }
}

#[async_trait::async_trait]
impl ProjectSource for Crashing {
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, FetchError> {
        panic!("project source crashed");
    }
}

#[test]
fn crashed_fetch_still_reports_a_failed_load() {
    let source = Arc::new(Crashing);
    let loader = CatalogLoader::new(source.clone(), RetryPolicy::default());
    let engine = EngineHandle::with_sources(loader, source).expect("engine");

    engine.load_catalog();
    match wait_for(&engine) {
        EngineEvent::CatalogLoaded(load) => {
            assert!(load.is_exhausted());
            assert!(load.catalog.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.load_projects();
    match wait_for(&engine) {
        EngineEvent::ProjectsLoaded(Err(err)) => {
            assert_eq!(err.kind, FailureKind::Aborted);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
