//! Endpoint paths and URL helpers shared by the client and the dev server.

/// Environment variable selecting the backend host.
pub const API_URL_ENV: &str = "MAICIVY_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Cookie the backend uses to track a visitor session.
pub const SESSION_COOKIE: &str = "maicivy_session";

/// Number of visits after which gated content requires a bypass.
pub const FREE_VISITS: u32 = 3;

pub const PATH_VISITORS_CHECK: &str = "/api/v1/visitors/check";
pub const PATH_REALTIME_WS: &str = "/ws/analytics";

pub const PATH_ANALYTICS_STATS: &str = "/api/analytics/stats";
pub const PATH_ANALYTICS_REALTIME: &str = "/api/v1/analytics/realtime";
pub const PATH_ANALYTICS_THEMES: &str = "/api/v1/analytics/themes";
pub const PATH_ANALYTICS_LETTERS: &str = "/api/v1/analytics/letters";

pub const PATH_CV: &str = "/api/v1/cv";
pub const PATH_CV_THEMES: &str = "/api/v1/cv/themes";

pub const PATH_LETTERS_GENERATE: &str = "/api/v1/letters/generate";

pub const PATH_GITHUB_STATUS: &str = "/api/v1/github/status";
pub const PATH_GITHUB_REPOS: &str = "/api/v1/github/repos";

pub const PATH_PROFILE_DETECT: &str = "/api/v1/profile/detect";

pub const PATH_TIMELINE: &str = "/api/v1/timeline";

/// Derive the realtime socket URL from an HTTP base URL.
///
/// `http` becomes `ws`, `https` becomes `wss`, and [`PATH_REALTIME_WS`] is
/// appended. Bases without an HTTP scheme are returned with the path only.
pub fn realtime_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{ws_base}{PATH_REALTIME_WS}")
}

/// Join a base URL and an absolute API path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if base_url.is_empty() {
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        }
    } else {
        let base = base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
