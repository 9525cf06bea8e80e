//! Frontend Models
//!
//! Wire types matching the project backend, plus the domain shapes the store
//! and reconciliation logic work with.

use serde::{Deserialize, Serialize};

// ========================
// Wire Types
// ========================

/// Group status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupStatus {
    Todo,
    InProgress,
    Done,
}

impl GroupStatus {
    pub fn label(self) -> &'static str {
        match self {
            GroupStatus::Todo => "TODO",
            GroupStatus::InProgress => "IN PROGRESS",
            GroupStatus::Done => "DONE",
        }
    }
}

/// One row of `GET /project-group`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroupSummary {
    pub project_group_id: u64,
    pub group_name: String,
    pub status: GroupStatus,
    #[serde(default)]
    pub total_project_count: u32,
    #[serde(default)]
    pub completed_project_count: u32,
}

/// Response of `GET /project-group/{groupId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub group_name: String,
    #[serde(default)]
    pub projects: Vec<ProjectDto>,
}

/// One project inside a group detail, or the body of a structured create response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub project_id: u64,
    pub content: String,
    #[serde(default)]
    pub complete_status: bool,
    #[serde(default)]
    pub next_project_ids: Vec<u64>,
}

/// Body of `POST /project`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest<'a> {
    pub content: &'a str,
    pub project_group_id: u64,
    pub prev_project_id: Option<u64>,
}

/// Body of `PATCH /project`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchProjectRequest {
    pub project_id: u64,
    pub complete_status: bool,
}

// ========================
// Domain Types
// ========================

/// Item identity: either a server-assigned id or a local placeholder that is
/// still waiting for the create request to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    Confirmed(u64),
    Pending(u64),
}

impl ItemId {
    pub fn confirmed(self) -> Option<u64> {
        match self {
            ItemId::Confirmed(id) => Some(id),
            ItemId::Pending(_) => None,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, ItemId::Pending(_))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Confirmed(id) => write!(f, "{id}"),
            ItemId::Pending(token) => write!(f, "tmp-{token}"),
        }
    }
}

/// A project inside a group, as the views see it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub id: ItemId,
    pub title: String,
    pub completed: bool,
    /// Outgoing dependency edges. May reference a `Pending` id until the
    /// corresponding create confirms.
    pub next_ids: Vec<ItemId>,
}

impl From<ProjectDto> for WorkItem {
    fn from(dto: ProjectDto) -> Self {
        WorkItem {
            id: ItemId::Confirmed(dto.project_id),
            title: dto.content,
            completed: dto.complete_status,
            next_ids: dto
                .next_project_ids
                .into_iter()
                .map(ItemId::Confirmed)
                .collect(),
        }
    }
}

/// Progress bar color bucket, matching the original dashboard palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTone {
    Done,
    InProgress,
    Neutral,
}

impl ProgressTone {
    pub fn color(self) -> &'static str {
        match self {
            ProgressTone::Done => "#4bce97",
            ProgressTone::InProgress => "#579dff",
            ProgressTone::Neutral => "#f5cd47",
        }
    }
}

/// One project group row on the board. `items` stays `None` until the group is
/// expanded for the first time.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    pub id: u64,
    pub name: String,
    pub status: GroupStatus,
    pub total_count: u32,
    pub completed_count: u32,
    pub expanded: bool,
    pub items: Option<Vec<WorkItem>>,
}

impl GroupRow {
    pub fn from_summary(summary: ProjectGroupSummary) -> Self {
        GroupRow {
            id: summary.project_group_id,
            name: summary.group_name,
            status: summary.status,
            total_count: summary.total_project_count,
            completed_count: summary.completed_project_count,
            expanded: false,
            items: None,
        }
    }

    /// Rounded completion percentage; 0 for an empty group.
    pub fn progress_percentage(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        ((self.completed_count as f64 / self.total_count as f64) * 100.0).round() as u32
    }

    pub fn progress_tone(&self) -> ProgressTone {
        let pct = self.progress_percentage();
        if pct >= 100 {
            ProgressTone::Done
        } else if pct > 0 {
            ProgressTone::InProgress
        } else {
            ProgressTone::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_of_empty_group_is_zero() {
        let row = GroupRow {
            id: 1,
            name: "Empty".into(),
            status: GroupStatus::Todo,
            total_count: 0,
            completed_count: 0,
            expanded: false,
            items: None,
        };
        assert_eq!(row.progress_percentage(), 0);
        assert_eq!(row.progress_tone(), ProgressTone::Neutral);
    }

    #[test]
    fn progress_rounds_and_maps_to_tone() {
        let mut row = GroupRow {
            id: 1,
            name: "G".into(),
            status: GroupStatus::InProgress,
            total_count: 3,
            completed_count: 1,
            expanded: false,
            items: None,
        };
        assert_eq!(row.progress_percentage(), 33);
        assert_eq!(row.progress_tone(), ProgressTone::InProgress);

        row.completed_count = 3;
        assert_eq!(row.progress_percentage(), 100);
        assert_eq!(row.progress_tone(), ProgressTone::Done);
    }

    #[test]
    fn group_summary_deserializes_from_backend_shape() {
        let json = r#"{
            "projectGroupId": 7,
            "groupName": "Travel Booking",
            "status": "IN_PROGRESS",
            "totalProjectCount": 4,
            "completedProjectCount": 2
        }"#;
        let summary: ProjectGroupSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.project_group_id, 7);
        assert_eq!(summary.status, GroupStatus::InProgress);
        assert_eq!(summary.completed_project_count, 2);
    }

    #[test]
    fn project_dto_defaults_missing_next_ids() {
        let json = r#"{"projectId": 3, "content": "Ship it", "completeStatus": true}"#;
        let dto: ProjectDto = serde_json::from_str(json).unwrap();
        let item = WorkItem::from(dto);
        assert_eq!(item.id, ItemId::Confirmed(3));
        assert!(item.completed);
        assert!(item.next_ids.is_empty());
    }
}
