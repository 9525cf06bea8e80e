//! Project Item Commands

use super::{request, ApiError, Body};
use crate::models::{CreateProjectRequest, PatchProjectRequest, ProjectDto};

/// Outcome of `POST /project`. The backend answers either with the created row
/// or with a plain acknowledgement; only the former carries a trustworthy id.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(ProjectDto),
    Acknowledged,
}

pub async fn create_project(args: &CreateProjectRequest<'_>) -> Result<CreateOutcome, ApiError> {
    let body = serde_json::to_string(args).map_err(|e| ApiError::Decode(e.to_string()))?;
    let text = request("POST", "/project", Body::Json(body)).await?;
    Ok(parse_create_response(&text))
}

fn parse_create_response(text: &str) -> CreateOutcome {
    match serde_json::from_str::<ProjectDto>(text) {
        Ok(dto) => CreateOutcome::Created(dto),
        Err(_) => CreateOutcome::Acknowledged,
    }
}

pub async fn set_complete_status(project_id: u64, complete_status: bool) -> Result<(), ApiError> {
    let body = serde_json::to_string(&PatchProjectRequest {
        project_id,
        complete_status,
    })
    .map_err(|e| ApiError::Decode(e.to_string()))?;
    request("PATCH", "/project", Body::Json(body)).await?;
    Ok(())
}

/// `PATCH /project/{id}` takes the new content as a raw text body, not JSON.
pub async fn rename_project(project_id: u64, content: &str) -> Result<(), ApiError> {
    request(
        "PATCH",
        &format!("/project/{project_id}"),
        Body::Text(content.to_string()),
    )
    .await?;
    Ok(())
}

pub async fn delete_project(project_id: u64) -> Result<(), ApiError> {
    request("DELETE", &format!("/project/{project_id}"), Body::Empty).await?;
    Ok(())
}

pub async fn complete_project(project_id: u64) -> Result<(), ApiError> {
    request("POST", &format!("/project/{project_id}/complete"), Body::Empty).await?;
    Ok(())
}

pub async fn undo_complete_project(project_id: u64) -> Result<(), ApiError> {
    request(
        "POST",
        &format!("/project/{project_id}/undo-complete"),
        Body::Empty,
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_parses_as_created() {
        let outcome = parse_create_response(r#"{"projectId": 42, "content": "B"}"#);
        match outcome {
            CreateOutcome::Created(dto) => assert_eq!(dto.project_id, 42),
            CreateOutcome::Acknowledged => panic!("expected a structured row"),
        }
    }

    #[test]
    fn plain_text_body_parses_as_acknowledged() {
        assert_eq!(parse_create_response("created"), CreateOutcome::Acknowledged);
        assert_eq!(parse_create_response(""), CreateOutcome::Acknowledged);
    }
}
