//! UI Components
//!
//! Leptos components for the project board and the service map.

mod creation_panel;
mod item_row;
mod project_board;
mod service_map;

pub use creation_panel::CreationPanel;
pub use item_row::ItemRow;
pub use project_board::ProjectBoard;
pub use service_map::ServiceMap;

use crate::api::ApiError;

/// Blocking notification for failures of destructive or important actions.
pub(crate) fn alert_failure(action: &str, error: &ApiError) {
    let message = match error {
        ApiError::LoginRequired => "Login required".to_string(),
        other => format!("{action}: {other}"),
    };
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&message);
    }
}
