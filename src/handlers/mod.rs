//! HTTP handlers.
//!
//! Each handler locks the visitor's session for the whole request, delegates
//! to [`ListManager`](crate::list_manager::ListManager) and picks a response:
//! a rendered page, a redirect with a flash message, or a bare status for
//! asynchronous callers.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::warn;

use crate::models::ListError;
use crate::session::Session;

pub mod lists;
pub mod todos;

/// True when the request carries `X-Requested-With: XMLHttpRequest`.
pub fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// Ids in the path that are not numbers name nothing. Ids start at 1, so the
/// 0 they map to never matches a list or todo.
fn parse_id(raw: &str) -> u64 {
    raw.parse().unwrap_or(0)
}

fn flag_missing(session: &mut Session, err: ListError) {
    warn!(?err, "lookup failed");
    session.flash_error(err.to_string());
}

fn not_found(session: &mut Session, err: ListError) -> Response {
    flag_missing(session, err);
    Redirect::to("/lists").into_response()
}

/// Asynchronous callers get `404` with the path to go to as the body; the
/// flash message waits there.
fn not_found_async(session: &mut Session, err: ListError) -> Response {
    flag_missing(session, err);
    (StatusCode::NOT_FOUND, "/lists").into_response()
}

fn rerender(page: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
}

fn redirect_to_list(list_id: u64) -> Response {
    Redirect::to(&format!("/lists/{list_id}")).into_response()
}

/// `GET /`
pub async fn root() -> Redirect {
    Redirect::to("/lists")
}

/// `GET /javascripts/application.js`
pub async fn application_js() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        include_str!("../../static/javascripts/application.js"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_xhr() {
        let mut headers = HeaderMap::new();
        assert!(!is_xhr(&headers));

        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_xhr(&headers));

        headers.insert("X-Requested-With", HeaderValue::from_static("fetch"));
        assert!(!is_xhr(&headers));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), 42);
        for raw in ["abc", "-1", "", "1.5", "99999999999999999999999"] {
            assert_eq!(parse_id(raw), 0, "{raw}");
        }
    }
}
