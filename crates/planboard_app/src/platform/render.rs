use chrono::{DateTime, NaiveDateTime, Utc};
use planboard_core::{format_date, time_ago, AppState, LocalePack, ProjectRowView};

const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Renders the session as plain text lines, translated through its catalog.
pub fn render(state: &AppState, pack: &LocalePack, now: &DateTime<Utc>) -> Vec<String> {
    let view = state.view();
    let stamp = format_date(Some(now), pack);
    let mut lines = vec![state.translate(
        "Session at {0} ({1})",
        &[stamp.as_str(), pack.locale.code()],
        None,
    )];

    lines.push(state.translate("Active projects", &[], None));
    if view.active_projects.is_empty() {
        lines.push(format!("  {}", state.translate("No projects", &[], None)));
    }
    for row in &view.active_projects {
        lines.push(project_line(state, row, now));
    }

    if !view.archived_projects.is_empty() {
        lines.push(state.translate("Archived projects", &[], None));
        for row in &view.archived_projects {
            lines.push(project_line(state, row, now));
        }
    }
    lines
}

fn project_line(state: &AppState, row: &ProjectRowView, now: &DateTime<Utc>) -> String {
    let tasks = row.tasks_count.to_string();
    let discussions = row.discussions_count.to_string();
    let mut line = format!(
        "  {} {} | {} | {}",
        row.route,
        row.title,
        state.translate("{0} tasks", &[tasks.as_str()], None),
        state.translate("{0} discussions", &[discussions.as_str()], None),
    );
    let modified = row
        .modified
        .as_deref()
        .and_then(|raw| NaiveDateTime::parse_from_str(raw, MODIFIED_FORMAT).ok())
        .map(|naive| naive.and_utc());
    if let Some(modified) = modified {
        let ago = time_ago(Some(&modified), now, state.catalog());
        line.push_str(" | ");
        line.push_str(&state.translate("updated {0}", &[ago.as_str()], None));
    }
    line
}
