//! Project Group Commands

use super::{decode, request, ApiError, Body};
use crate::models::{GroupDetail, ProjectGroupSummary};

pub async fn list_groups() -> Result<Vec<ProjectGroupSummary>, ApiError> {
    let text = request("GET", "/project-group", Body::Empty).await?;
    decode(&text)
}

pub async fn group_detail(group_id: u64) -> Result<GroupDetail, ApiError> {
    let text = request("GET", &format!("/project-group/{group_id}"), Body::Empty).await?;
    decode(&text)
}
