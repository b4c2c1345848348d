use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use planboard_core::{Catalog, ProjectRecord};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::wire::{CatalogSnapshot, ProjectSnapshot};

const CATALOG_FILENAME: &str = "translations.json";
const PROJECTS_FILENAME: &str = "projects.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cache directory missing or not writable: {0}")]
    CacheDir(String),
    #[error("snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the cache directory exists and is a writable directory.
pub fn ensure_cache_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::CacheDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::CacheDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::CacheDir(e.to_string()))?;
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::CacheDir(e.to_string()))?;
    Ok(())
}

/// Last-good catalog and project list, kept across sessions.
///
/// Each snapshot is written to a temp file and renamed into place, so a
/// reader sees either the previous snapshot or the new one.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_catalog(
        &self,
        catalog: &Catalog,
        language: Option<&str>,
    ) -> Result<PathBuf, PersistError> {
        let snapshot = CatalogSnapshot {
            language: language.map(ToOwned::to_owned),
            translations: catalog
                .sorted_entries()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        };
        self.write_json(CATALOG_FILENAME, &snapshot)
    }

    /// `Ok(None)` when no snapshot was saved yet.
    pub fn load_catalog(&self) -> Result<Option<(Catalog, Option<String>)>, PersistError> {
        let Some(snapshot) = self.read_json::<CatalogSnapshot>(CATALOG_FILENAME)? else {
            return Ok(None);
        };
        Ok(Some((
            Catalog::from_entries(snapshot.translations),
            snapshot.language,
        )))
    }

    pub fn save_projects(&self, projects: &[ProjectRecord]) -> Result<PathBuf, PersistError> {
        let rows: Vec<ProjectSnapshot> = projects.iter().map(ProjectSnapshot::from).collect();
        self.write_json(PROJECTS_FILENAME, &rows)
    }

    pub fn load_projects(&self) -> Result<Option<Vec<ProjectRecord>>, PersistError> {
        let rows = self.read_json::<Vec<ProjectSnapshot>>(PROJECTS_FILENAME)?;
        Ok(rows.map(|rows| rows.into_iter().map(ProjectRecord::from).collect()))
    }

    fn write_json<T: serde::Serialize>(
        &self,
        filename: &str,
        value: &T,
    ) -> Result<PathBuf, PersistError> {
        ensure_cache_dir(&self.dir)?;
        let content = serde_json::to_vec_pretty(value)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        filename: &str,
    ) -> Result<Option<T>, PersistError> {
        let path = self.dir.join(filename);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&content)?))
    }
}
