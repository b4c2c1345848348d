use crate::{Catalog, Locale, ProjectRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadCatalog,
    LoadProjects,
    ApplyLocale(Locale),
    Redirect {
        url: String,
    },
    PersistCatalog {
        catalog: Catalog,
        language: Option<String>,
    },
    PersistProjects(Vec<ProjectRecord>),
}
