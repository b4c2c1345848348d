use crate::{CatalogOrigin, Locale, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub locale: Locale,
    pub catalog_origin: CatalogOrigin,
    pub catalog_entries: usize,
    pub current_path: String,
    pub active_projects: Vec<ProjectRowView>,
    pub archived_projects: Vec<ProjectRowView>,
    pub last_redirect: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRowView {
    pub id: String,
    pub title: String,
    pub group: String,
    pub route: String,
    pub tasks_count: u32,
    pub discussions_count: u32,
    pub modified: Option<String>,
}
