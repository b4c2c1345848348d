//! JSON shapes exchanged with the server and the push channel.

use std::collections::HashMap;

use board_logging::board_debug;
use planboard_core::{Catalog, EntityDeleted, ProjectRecord};
use serde::{Deserialize, Serialize};

use crate::{CatalogPayload, FailureKind, FetchError};

/// Responses may arrive bare or inside the server's `{"message": ...}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { message: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { message } | Envelope::Bare(message) => message,
        }
    }
}

/// Ids are strings for most records but plain integers for autonamed ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(serde_json::Number),
}

impl IdValue {
    fn into_id(self) -> Option<String> {
        let id = match self {
            IdValue::Text(text) => text,
            IdValue::Number(number) => number.to_string(),
        };
        (!id.trim().is_empty()).then_some(id)
    }
}

/// Check fields come back as `0`/`1` or as booleans.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(value) => value,
            Flag::Int(value) => value != 0,
        }
    }
}

/// `translations` is required so that error envelopes such as
/// `{"message": null}` or `{"exc_type": ...}` fail to decode.
#[derive(Debug, Deserialize)]
struct CatalogBody {
    translations: HashMap<String, String>,
    #[serde(default)]
    language: Option<String>,
}

pub fn decode_catalog(bytes: &[u8]) -> Result<CatalogPayload, FetchError> {
    let body: Envelope<CatalogBody> = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    let body = body.into_inner();
    Ok(CatalogPayload {
        catalog: Catalog::from_entries(body.translations),
        language: body.language.filter(|language| !language.trim().is_empty()),
    })
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    #[serde(default)]
    name: Option<IdValue>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    team: Option<IdValue>,
    #[serde(default)]
    archived_at: Option<String>,
    #[serde(default)]
    is_private: Option<Flag>,
    #[serde(default)]
    modified: Option<String>,
    #[serde(default)]
    tasks_count: Option<u32>,
    #[serde(default)]
    discussions_count: Option<u32>,
}

impl ProjectRow {
    fn into_record(self) -> Option<ProjectRecord> {
        let id = self.name?.into_id()?;
        Some(ProjectRecord {
            title: self.title.unwrap_or_else(|| id.clone()),
            id,
            group: self.team.and_then(IdValue::into_id).unwrap_or_default(),
            icon: self.icon,
            archived: self.archived_at.is_some_and(|at| !at.is_empty()),
            is_private: self.is_private.is_some_and(Flag::is_set),
            modified: self.modified,
            tasks_count: self.tasks_count.unwrap_or_default(),
            discussions_count: self.discussions_count.unwrap_or_default(),
        })
    }
}

/// Decodes the project list; rows without an id are skipped.
pub fn decode_projects(bytes: &[u8]) -> Result<Vec<ProjectRecord>, FetchError> {
    let rows: Envelope<Vec<ProjectRow>> = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    Ok(rows
        .into_inner()
        .into_iter()
        .filter_map(ProjectRow::into_record)
        .collect())
}

#[derive(Debug, Default, Deserialize)]
struct DeletedFields {
    #[serde(default, alias = "project")]
    entity: Option<IdValue>,
    #[serde(default)]
    merged_with: Option<IdValue>,
    #[serde(default, alias = "team")]
    group: Option<IdValue>,
    #[serde(default, alias = "old_team")]
    old_group: Option<IdValue>,
}

impl DeletedFields {
    fn into_event(self) -> Option<EntityDeleted> {
        Some(EntityDeleted {
            entity: self.entity?.into_id()?,
            merged_with: self.merged_with.and_then(IdValue::into_id),
            group: self.group.and_then(IdValue::into_id),
            old_group: self.old_group.and_then(IdValue::into_id),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PushBody {
    #[serde(default, alias = "project_deleted")]
    entity_deleted: Option<serde_json::Value>,
    /// Older servers put the fields next to the marker instead of inside it.
    #[serde(flatten)]
    sibling_fields: DeletedFields,
}

#[derive(Debug, Deserialize)]
struct PushMessage {
    message: Option<PushBody>,
}

/// Decodes one push-channel message.
///
/// Anything that is not a well-formed entity deletion, including unrelated
/// message kinds, decodes to `None`.
pub fn decode_push(text: &str) -> Option<EntityDeleted> {
    let message: PushMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(err) => {
            board_debug!("Ignoring undecodable push message: {}", err);
            return None;
        }
    };
    let body = message.message?;
    let fields = match body.entity_deleted? {
        serde_json::Value::Object(map) => {
            match serde_json::from_value::<DeletedFields>(serde_json::Value::Object(map)) {
                Ok(nested) if nested.entity.is_some() => nested,
                Ok(_) => body.sibling_fields,
                Err(err) => {
                    board_debug!("Ignoring malformed entity_deleted payload: {}", err);
                    return None;
                }
            }
        }
        serde_json::Value::Null | serde_json::Value::Bool(false) => return None,
        _ => body.sibling_fields,
    };
    let event = fields.into_event();
    if event.is_none() {
        board_debug!("Ignoring entity_deleted without an entity id");
    }
    event
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CatalogSnapshot {
    pub language: Option<String>,
    pub translations: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProjectSnapshot {
    pub name: String,
    pub title: String,
    pub team: String,
    pub icon: Option<String>,
    pub archived: bool,
    pub is_private: bool,
    pub modified: Option<String>,
    pub tasks_count: u32,
    pub discussions_count: u32,
}

impl From<&ProjectRecord> for ProjectSnapshot {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            name: record.id.clone(),
            title: record.title.clone(),
            team: record.group.clone(),
            icon: record.icon.clone(),
            archived: record.archived,
            is_private: record.is_private,
            modified: record.modified.clone(),
            tasks_count: record.tasks_count,
            discussions_count: record.discussions_count,
        }
    }
}

impl From<ProjectSnapshot> for ProjectRecord {
    fn from(snapshot: ProjectSnapshot) -> Self {
        Self {
            id: snapshot.name,
            title: snapshot.title,
            group: snapshot.team,
            icon: snapshot.icon,
            archived: snapshot.archived,
            is_private: snapshot.is_private,
            modified: snapshot.modified,
            tasks_count: snapshot.tasks_count,
            discussions_count: snapshot.discussions_count,
        }
    }
}
