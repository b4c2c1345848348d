use board_logging::{board_error, board_info, board_warn};
use planboard_core::{Catalog, Msg, ProjectRecord};
use planboard_engine::SnapshotStore;

/// Reads back the last session's snapshots as warm-start messages.
///
/// Unreadable snapshots are logged and skipped.
pub(crate) fn restore_messages(store: &SnapshotStore) -> Vec<Msg> {
    let mut messages = Vec::new();

    match store.load_catalog() {
        Ok(Some((catalog, language))) => {
            board_info!(
                "Restored catalog snapshot entries={} language={:?}",
                catalog.len(),
                language
            );
            messages.push(Msg::CatalogRestored { catalog, language });
        }
        Ok(None) => {}
        Err(err) => {
            board_warn!("Failed to read catalog snapshot in {:?}: {}", store.dir(), err);
        }
    }

    match store.load_projects() {
        Ok(Some(projects)) => {
            board_info!("Restored {} projects from snapshot", projects.len());
            messages.push(Msg::ProjectsRestored(projects));
        }
        Ok(None) => {}
        Err(err) => {
            board_warn!("Failed to read project snapshot in {:?}: {}", store.dir(), err);
        }
    }

    messages
}

pub(crate) fn save_catalog(store: &SnapshotStore, catalog: &Catalog, language: Option<&str>) {
    if let Err(err) = store.save_catalog(catalog, language) {
        board_error!("Failed to write catalog snapshot to {:?}: {}", store.dir(), err);
    }
}

pub(crate) fn save_projects(store: &SnapshotStore, projects: &[ProjectRecord]) {
    if let Err(err) = store.save_projects(projects) {
        board_error!("Failed to write project snapshot to {:?}: {}", store.dir(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn saved_snapshots_come_back_as_restore_messages() {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path().to_path_buf());
        assert!(restore_messages(&store).is_empty());

        let catalog = Catalog::from_entries([("Done", "Готово")]);
        let project = ProjectRecord {
            id: "P1".to_string(),
            title: "Alpha".to_string(),
            group: "T1".to_string(),
            ..ProjectRecord::default()
        };
        save_catalog(&store, &catalog, Some("ru"));
        save_projects(&store, std::slice::from_ref(&project));

        assert_eq!(
            restore_messages(&store),
            vec![
                Msg::CatalogRestored {
                    catalog,
                    language: Some("ru".to_string()),
                },
                Msg::ProjectsRestored(vec![project]),
            ]
        );
    }

    #[test]
    fn corrupt_snapshot_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("translations.json"), "nope").unwrap();
        let store = SnapshotStore::new(temp.path().to_path_buf());
        assert!(restore_messages(&store).is_empty());
    }
}
