use crate::{AppState, Catalog, CatalogOrigin, Effect, Locale, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Results that arrive while no session is active are dropped, so a fetch
/// that outlives its page cannot repopulate a cleared state.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let active = state.session() == SessionState::Active;
    let effects = match msg {
        Msg::SessionStarted { path } => {
            if active {
                // Catalog and list are fetched once per session.
                state.navigate(path);
                Vec::new()
            } else {
                state.start_session(path);
                vec![Effect::LoadCatalog, Effect::LoadProjects]
            }
        }
        Msg::CatalogRestored { catalog, language } if active => {
            if state.restore_catalog(catalog, language.as_deref()) {
                vec![Effect::ApplyLocale(state.locale())]
            } else {
                Vec::new()
            }
        }
        Msg::CatalogLoaded { catalog, language } if active => {
            state.set_catalog(catalog.clone(), language.as_deref(), CatalogOrigin::Live);
            vec![
                Effect::ApplyLocale(state.locale()),
                Effect::PersistCatalog { catalog, language },
            ]
        }
        Msg::CatalogUnavailable if active => {
            state.set_catalog(Catalog::new(), None, CatalogOrigin::Fallback);
            vec![Effect::ApplyLocale(Locale::DEFAULT)]
        }
        Msg::ProjectsRestored(records) if active => {
            state.restore_projects(records);
            Vec::new()
        }
        Msg::ProjectsLoaded(records) if active => {
            state.set_projects(records);
            vec![Effect::PersistProjects(state.projects().records().to_vec())]
        }
        Msg::PushReceived(event) if active => {
            let (changed, redirect) = state.apply_deletion(&event);
            let mut effects = Vec::new();
            if changed {
                effects.push(Effect::PersistProjects(state.projects().records().to_vec()));
            }
            if let Some(url) = redirect {
                effects.push(Effect::Redirect { url });
            }
            effects
        }
        Msg::Navigated(path) if active => {
            state.navigate(path);
            Vec::new()
        }
        Msg::SessionEnded => {
            if active {
                state.end_session();
            }
            Vec::new()
        }
        Msg::CatalogRestored { .. }
        | Msg::CatalogLoaded { .. }
        | Msg::CatalogUnavailable
        | Msg::ProjectsRestored(_)
        | Msg::ProjectsLoaded(_)
        | Msg::PushReceived(_)
        | Msg::Navigated(_)
        | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
