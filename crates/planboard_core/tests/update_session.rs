use std::sync::Once;

use planboard_core::{
    update, AppState, Catalog, CatalogOrigin, Effect, EntityDeleted, Locale, Msg, ProjectRecord,
    SessionState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(board_logging::initialize_for_tests);
}

fn project(id: &str, title: &str, group: &str) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        group: group.to_string(),
        ..ProjectRecord::default()
    }
}

fn started(path: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::SessionStarted {
            path: path.to_string(),
        },
    );
    state
}

fn deletion() -> EntityDeleted {
    EntityDeleted {
        entity: "PROJ1".to_string(),
        merged_with: Some("PROJ2".to_string()),
        group: Some("TEAM2".to_string()),
        old_group: Some("TEAM1".to_string()),
    }
}

#[test]
fn session_start_requests_catalog_and_projects_once() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::SessionStarted {
            path: "/g/TEAM1".to_string(),
        },
    );
    assert_eq!(state.session(), SessionState::Active);
    assert_eq!(effects, vec![Effect::LoadCatalog, Effect::LoadProjects]);

    let (state, effects) = update(
        state,
        Msg::SessionStarted {
            path: "/g/TEAM2".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.current_path(), "/g/TEAM2");
}

#[test]
fn loaded_catalog_sets_locale_and_is_persisted() {
    init_logging();
    let catalog = Catalog::from_entries([("Save", "Сохранить")]);
    let (state, effects) = update(
        started("/"),
        Msg::CatalogLoaded {
            catalog: catalog.clone(),
            language: Some("ru-RU".to_string()),
        },
    );

    assert_eq!(state.locale(), Locale::Ru);
    assert_eq!(state.catalog_origin(), CatalogOrigin::Live);
    assert_eq!(state.translate("Save", &[], None), "Сохранить");
    assert_eq!(
        effects,
        vec![
            Effect::ApplyLocale(Locale::Ru),
            Effect::PersistCatalog {
                catalog,
                language: Some("ru-RU".to_string()),
            },
        ]
    );
}

#[test]
fn unknown_language_falls_back_to_english() {
    init_logging();
    let (state, effects) = update(
        started("/"),
        Msg::CatalogLoaded {
            catalog: Catalog::new(),
            language: Some("tlh".to_string()),
        },
    );
    assert_eq!(state.locale(), Locale::En);
    assert_eq!(effects[0], Effect::ApplyLocale(Locale::En));
}

#[test]
fn exhausted_fetch_degrades_to_identity_translation() {
    init_logging();
    let (state, _) = update(
        started("/"),
        Msg::CatalogRestored {
            catalog: Catalog::from_entries([("Save", "Сохранить")]),
            language: Some("ru".to_string()),
        },
    );
    assert_eq!(state.catalog_origin(), CatalogOrigin::Snapshot);

    let (state, effects) = update(state, Msg::CatalogUnavailable);

    assert!(state.catalog().is_empty());
    assert_eq!(state.catalog_origin(), CatalogOrigin::Fallback);
    assert_eq!(state.translate("Save", &[], None), "Save");
    assert_eq!(effects, vec![Effect::ApplyLocale(Locale::En)]);
}

#[test]
fn snapshot_never_overrides_live_catalog() {
    init_logging();
    let (state, _) = update(
        started("/"),
        Msg::CatalogLoaded {
            catalog: Catalog::from_entries([("Save", "Speichern")]),
            language: Some("de".to_string()),
        },
    );
    let (state, effects) = update(
        state,
        Msg::CatalogRestored {
            catalog: Catalog::from_entries([("Save", "Сохранить")]),
            language: Some("ru".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.locale(), Locale::De);
    assert_eq!(state.translate("Save", &[], None), "Speichern");
}

#[test]
fn push_deletion_updates_cache_and_redirects() {
    init_logging();
    let (state, _) = update(
        started("/g/TEAM1/projects/PROJ1"),
        Msg::ProjectsLoaded(vec![
            project("PROJ1", "Alpha", "TEAM1"),
            project("PROJ2", "Beta", "TEAM2"),
        ]),
    );

    let (mut state, effects) = update(state, Msg::PushReceived(deletion()));

    assert_eq!(
        effects,
        vec![
            Effect::PersistProjects(vec![project("PROJ2", "Beta", "TEAM2")]),
            Effect::Redirect {
                url: "/g/TEAM2/projects/PROJ2".to_string(),
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.active_projects.len(), 1);
    assert_eq!(view.last_redirect.as_deref(), Some("/g/TEAM2/projects/PROJ2"));
    assert!(state.consume_dirty());

    // Replaying the event only repeats the redirect decision.
    let (_, effects) = update(state, Msg::PushReceived(deletion()));
    assert_eq!(
        effects,
        vec![Effect::Redirect {
            url: "/g/TEAM2/projects/PROJ2".to_string(),
        }]
    );
}

#[test]
fn push_for_other_page_only_prunes_cache() {
    init_logging();
    let (state, _) = update(
        started("/g/TEAM2/projects/PROJ2"),
        Msg::ProjectsLoaded(vec![
            project("PROJ1", "Alpha", "TEAM1"),
            project("PROJ2", "Beta", "TEAM2"),
        ]),
    );
    let (state, effects) = update(state, Msg::PushReceived(deletion()));

    assert_eq!(
        effects,
        vec![Effect::PersistProjects(vec![project("PROJ2", "Beta", "TEAM2")])]
    );
    assert_eq!(state.view().last_redirect, None);
}

#[test]
fn restored_projects_yield_to_live_list() {
    init_logging();
    let (state, _) = update(
        started("/"),
        Msg::ProjectsLoaded(vec![project("PROJ2", "Beta", "TEAM2")]),
    );
    let (state, effects) = update(
        state,
        Msg::ProjectsRestored(vec![project("OLD", "Stale", "TEAM1")]),
    );

    assert!(effects.is_empty());
    let ids: Vec<_> = state.projects().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["PROJ2".to_string()]);
}

#[test]
fn navigation_changes_redirect_decision() {
    init_logging();
    let (state, _) = update(
        started("/g/TEAM1/projects/PROJ1"),
        Msg::Navigated("/g/TEAM1".to_string()),
    );
    let (_, effects) = update(state, Msg::PushReceived(deletion()));
    assert!(effects.is_empty());
}

#[test]
fn session_end_clears_everything_and_drops_late_results() {
    init_logging();
    let (state, _) = update(
        started("/g/TEAM1"),
        Msg::ProjectsLoaded(vec![project("PROJ1", "Alpha", "TEAM1")]),
    );
    let (state, effects) = update(state, Msg::SessionEnded);
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert!(state.projects().is_empty());
    assert_eq!(state.current_path(), "");

    let (state, effects) = update(
        state,
        Msg::CatalogLoaded {
            catalog: Catalog::from_entries([("Save", "Сохранить")]),
            language: Some("ru".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert!(state.catalog().is_empty());
    assert_eq!(state.locale(), Locale::En);
}
