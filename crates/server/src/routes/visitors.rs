//! Visit tracking keyed by the session cookie.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use maicivy_shared::SESSION_COOKIE;
use uuid::Uuid;

use crate::state::AppState;

/// Count a visit for the caller's session, issuing a session cookie on the
/// first request.
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let existing = session_from_headers(&headers);
    let session_id = existing
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let status = state.record_visit(&session_id).await;
    tracing::debug!(
        "Visit {} for session {} (access: {})",
        status.visit_count,
        session_id,
        status.has_access
    );

    let mut response = Json(status).into_response();
    if existing.is_none() {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, session_id);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid session cookie header: {}", e),
        }
    }
    response
}

/// Session id from any `Cookie` header, ignoring empty values.
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| cookie_value(raw, SESSION_COOKIE))
}

fn cookie_value(raw: &str, name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; maicivy_session=abc-123; lang=fr"),
        );
        assert_eq!(session_from_headers(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn ignores_missing_or_empty_session() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_from_headers(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("maicivy_session="));
        assert_eq!(session_from_headers(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("maicivy_session_old=x"));
        assert_eq!(session_from_headers(&headers), None);
    }
}
