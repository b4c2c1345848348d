use crate::reconcile::on_entity_deleted;
use crate::view_model::{AppViewModel, ProjectRowView};
use crate::{Catalog, EntityDeleted, Locale, ProjectCache, ProjectRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active,
}

/// Where the catalog in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogOrigin {
    #[default]
    None,
    Snapshot,
    Live,
    /// The live fetch was exhausted; translation is the identity.
    Fallback,
}

/// Everything one page session owns. Created on load, cleared on session end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    catalog: Catalog,
    catalog_origin: CatalogOrigin,
    locale: Locale,
    projects: ProjectCache,
    projects_live: bool,
    current_path: String,
    last_redirect: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_origin(&self) -> CatalogOrigin {
        self.catalog_origin
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn projects(&self) -> &ProjectCache {
        &self.projects
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn translate(&self, message: &str, args: &[&str], context: Option<&str>) -> String {
        self.catalog.translate(message, args, context)
    }

    pub fn view(&self) -> AppViewModel {
        let row = |project: &ProjectRecord| ProjectRowView {
            id: project.id.clone(),
            title: project.title.clone(),
            group: project.group.clone(),
            route: project.route(),
            tasks_count: project.tasks_count,
            discussions_count: project.discussions_count,
            modified: project.modified.clone(),
        };
        AppViewModel {
            session: self.session,
            locale: self.locale,
            catalog_origin: self.catalog_origin,
            catalog_entries: self.catalog.len(),
            current_path: self.current_path.clone(),
            active_projects: self.projects.active().map(row).collect(),
            archived_projects: self.projects.archived().map(row).collect(),
            last_redirect: self.last_redirect.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn start_session(&mut self, path: String) {
        self.session = SessionState::Active;
        self.current_path = path;
        self.mark_dirty();
    }

    pub(crate) fn end_session(&mut self) {
        *self = Self {
            dirty: true,
            ..Self::default()
        };
    }

    /// Applies a snapshot catalog unless a live result already arrived.
    pub(crate) fn restore_catalog(&mut self, catalog: Catalog, language: Option<&str>) -> bool {
        if matches!(
            self.catalog_origin,
            CatalogOrigin::Live | CatalogOrigin::Fallback
        ) {
            return false;
        }
        self.set_catalog(catalog, language, CatalogOrigin::Snapshot);
        true
    }

    pub(crate) fn set_catalog(
        &mut self,
        catalog: Catalog,
        language: Option<&str>,
        origin: CatalogOrigin,
    ) {
        self.catalog = catalog;
        self.locale = Locale::resolve(language);
        self.catalog_origin = origin;
        self.mark_dirty();
    }

    pub(crate) fn restore_projects(&mut self, records: Vec<ProjectRecord>) -> bool {
        if self.projects_live {
            return false;
        }
        self.projects = ProjectCache::from_records(records);
        self.mark_dirty();
        true
    }

    pub(crate) fn set_projects(&mut self, records: Vec<ProjectRecord>) {
        self.projects = ProjectCache::from_records(records);
        self.projects_live = true;
        self.mark_dirty();
    }

    /// Runs the reconciler against the cache. Returns whether the cache
    /// changed and the redirect target, if any.
    pub(crate) fn apply_deletion(&mut self, event: &EntityDeleted) -> (bool, Option<String>) {
        let before = self.projects.len();
        let cache = std::mem::take(&mut self.projects);
        let (cache, redirect) = on_entity_deleted(cache, event, &self.current_path);
        self.projects = cache;
        let changed = self.projects.len() != before;
        if changed || redirect.is_some() {
            self.last_redirect = redirect.clone();
            self.mark_dirty();
        }
        (changed, redirect)
    }

    pub(crate) fn navigate(&mut self, path: String) {
        if self.current_path != path {
            self.current_path = path;
            self.mark_dirty();
        }
    }
}
