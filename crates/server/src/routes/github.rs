use axum::Json;
use maicivy_shared::{ApiEnvelope, GithubRepo, GithubStatus};

pub async fn status() -> Json<GithubStatus> {
    Json(GithubStatus {
        connected: true,
        username: Some("maicivy".to_string()),
        last_sync: Some(chrono::Utc::now().to_rfc3339()),
        repos_count: 1,
    })
}

pub async fn repos() -> Json<ApiEnvelope<Vec<GithubRepo>>> {
    Json(ApiEnvelope::ok(vec![GithubRepo {
        name: "maicivy".to_string(),
        full_name: "maicivy/maicivy".to_string(),
        description: Some("Interactive CV".to_string()),
        html_url: "https://github.com/maicivy/maicivy".to_string(),
        language: Some("Rust".to_string()),
        stars: 7,
    }]))
}
