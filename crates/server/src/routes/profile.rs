//! Visitor profile detection from request headers.

use axum::{
    http::{header, HeaderMap},
    Json,
};
use maicivy_shared::{DetectedProfile, ProfileType};

pub async fn detect(headers: HeaderMap) -> Json<DetectedProfile> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Json(detect_from_user_agent(user_agent))
}

fn detect_from_user_agent(user_agent: &str) -> DetectedProfile {
    let ua = user_agent.to_lowercase();
    let (profile_type, confidence) = if ua.contains("linkedin") {
        (ProfileType::Recruiter, 0.8)
    } else if ua.contains("curl") || ua.contains("httpie") {
        (ProfileType::Developer, 0.6)
    } else {
        (ProfileType::Unknown, 0.0)
    };

    DetectedProfile {
        bypass_enabled: profile_type == ProfileType::Recruiter,
        profile_type,
        confidence,
    }
}
