//! Outcome types every handler matches on before rendering.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::warn;
use trustwatch_common::{ApiError, ApiResult};

use crate::render;

/// Data a page mounted with, or the reason it could not.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            ViewState::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Ready(_) => None,
            ViewState::Failed(msg) => Some(msg),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Ready(data) => ViewState::Ready(f(data)),
            ViewState::Failed(msg) => ViewState::Failed(msg),
        }
    }
}

impl<T> From<ApiResult<T>> for ViewState<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(err) => {
                log_failure(&err);
                ViewState::Failed(err.to_string())
            }
        }
    }
}

pub fn log_failure(err: &ApiError) {
    warn!(operation = %err.operation(), "{}", err);
}

/// Banner shown above a page after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn failed(err: &ApiError) -> Self {
        log_failure(err);
        Notice::Error(err.to_string())
    }

    pub fn to_html(&self) -> String {
        let (class, text) = match self {
            Notice::Success(text) => ("alert-success", text),
            Notice::Error(text) => ("alert-danger", text),
        };
        format!(r#"<div class="alert {}" role="status">{}</div>"#, class, render::escape(text))
    }
}

/// Flash parameters carried on a post-mutation redirect.
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub notice: Option<String>,
    pub found: Option<usize>,
}

impl Flash {
    pub fn notice(&self) -> Option<Notice> {
        let text = match self.notice.as_deref()? {
            "influencer_added" => "Influencer added".to_string(),
            "claim_added" => "Claim added".to_string(),
            "scanned" => format!("Found {} new claims", self.found.unwrap_or(0)),
            _ => return None,
        };
        Some(Notice::Success(text))
    }
}

/// Redirect after a successful mutation so the page re-runs its full fetch.
pub fn refresh(location: &str) -> Response {
    Redirect::to(location).into_response()
}

/// Answer for a mount whose scope was cancelled (server shutting down).
pub fn abandoned() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Html(render::page(
            "Unavailable",
            "",
            "<p class=\"text-muted\">The dashboard is shutting down.</p>",
        )),
    )
        .into_response()
}
