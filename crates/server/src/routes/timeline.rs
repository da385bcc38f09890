use axum::{extract::Query, Json};
use maicivy_shared::{ApiEnvelope, TimelineEvent};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    pub category: Option<String>,
}

/// Timeline events, filtered by `?category=` when given.
pub async fn list(Query(query): Query<TimelineQuery>) -> Json<ApiEnvelope<Vec<TimelineEvent>>> {
    let events = canned_events()
        .into_iter()
        .filter(|e| query.category.as_ref().is_none_or(|c| &e.category == c))
        .collect();
    Json(ApiEnvelope::ok(events))
}

fn canned_events() -> Vec<TimelineEvent> {
    vec![
        TimelineEvent {
            id: "exp-1".to_string(),
            category: "experience".to_string(),
            title: "Software Engineer".to_string(),
            subtitle: Some("Example Corp".to_string()),
            start_date: "2021-01-01".to_string(),
            end_date: None,
            tags: vec!["rust".to_string()],
        },
        TimelineEvent {
            id: "proj-1".to_string(),
            category: "project".to_string(),
            title: "maicivy".to_string(),
            subtitle: None,
            start_date: "2023-06-01".to_string(),
            end_date: None,
            tags: vec!["dioxus".to_string(), "axum".to_string()],
        },
        TimelineEvent {
            id: "edu-1".to_string(),
            category: "education".to_string(),
            title: "MSc Computer Science".to_string(),
            subtitle: None,
            start_date: "2016-09-01".to_string(),
            end_date: Some("2018-06-30".to_string()),
            tags: vec![],
        },
    ]
}
