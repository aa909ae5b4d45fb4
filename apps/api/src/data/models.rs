//! Resource kinds, mutation payloads and response shapes for the data API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::models::PostStatus;
use crate::models::content::{HookRow, IdeaRow, PostRow, ScheduleEntryRow, TopicRow};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Ideas,
    Hooks,
    Topics,
    Drafts,
    Schedule,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Ideas => "ideas",
            ResourceKind::Hooks => "hooks",
            ResourceKind::Topics => "topics",
            ResourceKind::Drafts => "drafts",
            ResourceKind::Schedule => "schedule",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ideas" => Ok(ResourceKind::Ideas),
            "hooks" => Ok(ResourceKind::Hooks),
            "topics" => Ok(ResourceKind::Topics),
            "drafts" => Ok(ResourceKind::Drafts),
            "schedule" => Ok(ResourceKind::Schedule),
            other => Err(format!("unknown resource type '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IdeaInput {
    pub content: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HookInput {
    pub text: String,
    pub hook_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TopicInput {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DraftInput {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DraftUpdate {
    pub id: Uuid,
    pub content: String,
    pub score: Option<f64>,
    /// Defaults to `draft`.
    #[serde(default = "default_draft_status")]
    pub status: PostStatus,
}

fn default_draft_status() -> PostStatus {
    PostStatus::Draft
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleInput {
    pub content: String,
    #[serde(rename = "scheduledTime")]
    pub scheduled_for: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: Uuid,
}

/// A validated `POST /api/v1/data` body.
#[derive(Debug, Clone, PartialEq)]
pub enum DataCommand {
    CreateIdea(IdeaInput),
    CreateHook(HookInput),
    CreateTopic(TopicInput),
    CreateDraft(DraftInput),
    UpdateDraft(DraftUpdate),
    Schedule(ScheduleInput),
    Delete { kind: ResourceKind, id: Uuid },
}

impl DataCommand {
    /// Unknown type/action pairs are rejected as "Invalid action".
    pub fn parse(kind: &str, action: &str, data: serde_json::Value) -> Result<Self, AppError> {
        let invalid = || AppError::Validation("Invalid action".to_string());
        let kind: ResourceKind = kind.parse().map_err(|_| invalid())?;

        let command = match (kind, action) {
            (ResourceKind::Ideas, "create") => {
                let input: IdeaInput = payload(kind, data)?;
                require_text(&input.content, "Content required")?;
                DataCommand::CreateIdea(input)
            }
            (ResourceKind::Hooks, "create") => {
                let input: HookInput = payload(kind, data)?;
                require_text(&input.text, "Hook text required")?;
                DataCommand::CreateHook(input)
            }
            (ResourceKind::Topics, "create") => {
                let input: TopicInput = payload(kind, data)?;
                require_text(&input.name, "Topic name required")?;
                DataCommand::CreateTopic(input)
            }
            (ResourceKind::Drafts, "create") => {
                let input: DraftInput = payload(kind, data)?;
                require_text(&input.content, "Content required")?;
                DataCommand::CreateDraft(input)
            }
            (ResourceKind::Drafts, "update") => {
                let input: DraftUpdate = payload(kind, data)?;
                require_text(&input.content, "Content required")?;
                DataCommand::UpdateDraft(input)
            }
            (ResourceKind::Schedule, "create") => {
                let input: ScheduleInput = payload(kind, data)?;
                require_text(&input.content, "Content required")?;
                DataCommand::Schedule(input)
            }
            (_, "delete") => {
                let IdRef { id } = payload(kind, data)?;
                DataCommand::Delete { kind, id }
            }
            _ => return Err(invalid()),
        };
        Ok(command)
    }
}

fn payload<T: DeserializeOwned>(kind: ResourceKind, data: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(data)
        .map_err(|e| AppError::Validation(format!("Invalid {kind} data: {e}")))
}

fn require_text(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Responses
// ────────────────────────────────────────────────────────────────────────────

/// A queue entry together with the post it publishes.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduledPost {
    #[serde(flatten)]
    pub entry: ScheduleEntryRow,
    pub posts: Option<PostRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResourceList {
    Ideas(Vec<IdeaRow>),
    Hooks(Vec<HookRow>),
    Topics(Vec<TopicRow>),
    Drafts(Vec<PostRow>),
    Schedule(Vec<ScheduledPost>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResourceItem {
    Idea(IdeaRow),
    Hook(HookRow),
    Topic(TopicRow),
    Post(PostRow),
    Scheduled(ScheduledPost),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_idea_create_defaults_topics() {
        let command =
            DataCommand::parse("ideas", "create", json!({ "content": "thread on pricing" }))
                .unwrap();
        assert_eq!(
            command,
            DataCommand::CreateIdea(IdeaInput {
                content: "thread on pricing".to_string(),
                topics: vec![],
            })
        );
    }

    #[test]
    fn test_parse_hook_uses_camel_case_type() {
        let command = DataCommand::parse(
            "hooks",
            "create",
            json!({ "text": "Nobody tells you this", "hookType": "curiosity" }),
        )
        .unwrap();
        match command {
            DataCommand::CreateHook(hook) => {
                assert_eq!(hook.hook_type.as_deref(), Some("curiosity"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_draft_update_defaults_to_draft_status() {
        let id = Uuid::new_v4();
        let command = DataCommand::parse(
            "drafts",
            "update",
            json!({ "id": id, "content": "edited", "score": 7.5 }),
        )
        .unwrap();
        assert_eq!(
            command,
            DataCommand::UpdateDraft(DraftUpdate {
                id,
                content: "edited".to_string(),
                score: Some(7.5),
                status: PostStatus::Draft,
            })
        );
    }

    #[test]
    fn test_parse_schedule_reads_scheduled_time() {
        let command = DataCommand::parse(
            "schedule",
            "create",
            json!({ "content": "launch day", "scheduledTime": "2024-07-01T09:00:00Z" }),
        )
        .unwrap();
        match command {
            DataCommand::Schedule(input) => {
                assert_eq!(input.scheduled_for.to_rfc3339(), "2024-07-01T09:00:00+00:00");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_for_every_kind() {
        let id = Uuid::new_v4();
        for kind in ["ideas", "hooks", "topics", "drafts", "schedule"] {
            let command = DataCommand::parse(kind, "delete", json!({ "id": id })).unwrap();
            assert!(matches!(command, DataCommand::Delete { id: got, .. } if got == id));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_pairs() {
        for (kind, action) in [("ideas", "update"), ("followers", "create"), ("topics", "archive")] {
            let err = DataCommand::parse(kind, action, json!({})).unwrap_err();
            assert!(matches!(err, AppError::Validation(msg) if msg == "Invalid action"));
        }
    }

    #[test]
    fn test_parse_rejects_blank_content_and_bad_payloads() {
        let err = DataCommand::parse("drafts", "create", json!({ "content": "  " })).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Content required"));

        let err = DataCommand::parse("ideas", "delete", json!({ "id": "nope" })).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("Invalid ideas data")));
    }
}
