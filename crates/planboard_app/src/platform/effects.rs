use board_logging::{board_info, board_warn};
use planboard_core::{Effect, Locale, LocalePack, Msg};
use planboard_engine::{EngineEvent, EngineHandle, LoadOutcome, SnapshotStore};

use super::persistence;

/// Carries out effects produced by `update` and turns engine results back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    store: SnapshotStore,
    date_pack: LocalePack,
    pending_fetches: usize,
    redirects: Vec<String>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: SnapshotStore) -> Self {
        Self {
            engine,
            store,
            date_pack: Locale::DEFAULT.pack(),
            pending_fetches: 0,
            redirects: Vec::new(),
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn date_pack(&self) -> &LocalePack {
        &self.date_pack
    }

    pub fn has_pending_fetches(&self) -> bool {
        self.pending_fetches > 0
    }

    pub fn redirects(&self) -> &[String] {
        &self.redirects
    }

    /// Runs `effects` in order and returns the follow-up messages they produce.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadCatalog => {
                    self.pending_fetches += 1;
                    self.engine.load_catalog();
                }
                Effect::LoadProjects => {
                    self.pending_fetches += 1;
                    self.engine.load_projects();
                }
                Effect::ApplyLocale(locale) => {
                    board_info!("Date locale set to {}", locale.code());
                    self.date_pack = locale.pack();
                }
                Effect::Redirect { url } => {
                    board_info!("Redirecting to {}", url);
                    self.redirects.push(url.clone());
                    follow_ups.push(Msg::Navigated(url));
                }
                Effect::PersistCatalog { catalog, language } => {
                    persistence::save_catalog(&self.store, &catalog, language.as_deref());
                }
                Effect::PersistProjects(projects) => {
                    persistence::save_projects(&self.store, &projects);
                }
            }
        }
        follow_ups
    }

    /// Maps a finished engine request onto the message `update` expects.
    pub fn complete(&mut self, event: EngineEvent) -> Msg {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        engine_event_to_msg(event)
    }
}

pub(crate) fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CatalogLoaded(load) => match load.outcome {
            LoadOutcome::Loaded { .. } => Msg::CatalogLoaded {
                catalog: load.catalog,
                language: load.language,
            },
            LoadOutcome::Exhausted { .. } => Msg::CatalogUnavailable,
        },
        EngineEvent::ProjectsLoaded(Ok(projects)) => Msg::ProjectsLoaded(projects),
        EngineEvent::ProjectsLoaded(Err(err)) => {
            board_warn!("Keeping cached project list: {}", err);
            Msg::NoOp
        }
    }
}
