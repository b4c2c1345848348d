use percent_encoding::percent_decode_str;
use url::Url;

use crate::project::{project_route, GroupId, ProjectCache, ProjectId};

/// Server notice that `entity` was deleted, superseded by `merged_with` in `group`.
///
/// Only `entity` is required. A notice without a merge target or group still
/// evicts the entity but can never redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDeleted {
    pub entity: ProjectId,
    pub merged_with: Option<ProjectId>,
    pub group: Option<GroupId>,
    pub old_group: Option<GroupId>,
}

/// Applies a deletion to the cache and decides whether `current_path` must move.
///
/// Removing an entity that is not cached is a no-op. The redirect decision
/// depends only on the event and the path, so applying the same event twice
/// yields the same cache and the same redirect.
pub fn on_entity_deleted(
    mut cache: ProjectCache,
    event: &EntityDeleted,
    current_path: &str,
) -> (ProjectCache, Option<String>) {
    cache.remove(&event.entity);
    let redirect = redirect_for(event, current_path);
    (cache, redirect)
}

fn redirect_for(event: &EntityDeleted, current_path: &str) -> Option<String> {
    let (Some(merged_with), Some(group)) = (event.merged_with.as_deref(), event.group.as_deref())
    else {
        return None;
    };
    let segments = path_segments(current_path)?;
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    if refers_to(&segments, &event.entity, event.old_group.as_deref()) {
        Some(project_route(group, merged_with))
    } else {
        None
    }
}

/// Decoded path segments of a relative path or absolute URL, ignoring query,
/// fragment and empty segments.
///
/// Joining onto a base percent-encodes raw input, so encoded and unencoded
/// forms of the same path yield the same segments.
fn path_segments(current_path: &str) -> Option<Vec<String>> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(current_path).ok()?;
    let segments = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();
    Some(segments)
}

fn refers_to(segments: &[&str], entity: &str, old_group: Option<&str>) -> bool {
    let under_old_group = old_group.is_some_and(|group| {
        segments
            .windows(4)
            .any(|window| *window == ["g", group, "projects", entity])
    });
    under_old_group
        || segments
            .windows(2)
            .any(|window| *window == ["projects", entity])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_drop_query_fragment_and_empties() {
        assert_eq!(
            path_segments("/g/T1//projects/P1/?tab=tasks#top").unwrap(),
            vec!["g", "T1", "projects", "P1"]
        );
        assert_eq!(
            path_segments("https://board.example.com/g/T1/projects/P1").unwrap(),
            vec!["g", "T1", "projects", "P1"]
        );
    }

    #[test]
    fn segments_are_percent_decoded() {
        let expected = vec!["g", "T1", "projects", "Проект 1"];
        assert_eq!(path_segments("/g/T1/projects/Проект 1").unwrap(), expected);
        assert_eq!(
            path_segments("/g/T1/projects/%D0%9F%D1%80%D0%BE%D0%B5%D0%BA%D1%82%201").unwrap(),
            expected
        );
    }

    #[test]
    fn bare_segment_match_is_exact() {
        assert!(refers_to(&["projects", "P1"], "P1", None));
        assert!(!refers_to(&["projects", "P10"], "P1", None));
        assert!(!refers_to(&["tasks", "P1"], "P1", None));
    }
}
