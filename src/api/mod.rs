//! REST Command Wrappers
//!
//! Frontend bindings to the project backend, organized by domain. Every
//! request carries the bearer token from local session storage; a missing
//! token short-circuits with [`ApiError::LoginRequired`] before anything is
//! sent over the wire.

mod group;
mod project;

pub use group::*;
pub use project::*;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("login required")]
    LoginRequired,
    #[error("request failed: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        ApiError::Network(format!("{value:?}"))
    }
}

/// Backend base URL, resolved at build time like the original client's
/// `REACT_APP_API_URL`.
fn api_base() -> &'static str {
    option_env!("PERSONAL_LIFE_API_URL").unwrap_or("/api")
}

fn access_token() -> Result<String, ApiError> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    match storage.and_then(|s| s.get_item("accessToken").ok().flatten()) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::LoginRequired),
    }
}

pub(crate) enum Body {
    Empty,
    Json(String),
    Text(String),
}

pub(crate) async fn request(method: &str, path: &str, body: Body) -> Result<String, ApiError> {
    let token = access_token()?;

    let opts = RequestInit::new();
    opts.set_method(method);
    match &body {
        Body::Empty => {}
        Body::Json(payload) | Body::Text(payload) => {
            opts.set_body(&JsValue::from_str(payload));
        }
    }

    let url = format!("{}{}", api_base(), path);
    let request = Request::new_with_str_and_init(&url, &opts)?;
    let headers = request.headers();
    headers.set("Authorization", &format!("Bearer {token}"))?;
    match &body {
        Body::Json(_) => headers.set("Content-Type", "application/json")?,
        Body::Text(_) => headers.set("Content-Type", "text/plain")?,
        Body::Empty => {}
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()
        .map_err(|_| ApiError::Network("fetch did not return a Response".into()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
