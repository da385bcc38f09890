//! Canned CV content per theme.

use axum::{
    extract::Query,
    http::StatusCode,
    Json,
};
use maicivy_shared::{ApiEnvelope, CvDocument, CvExperience, CvProject, CvSkill, CvTheme};
use serde::Deserialize;

const THEMES: &[(&str, &str)] = &[
    ("backend", "Backend"),
    ("fullstack", "Full-stack"),
    ("devops", "DevOps"),
];

#[derive(Debug, Deserialize)]
pub struct CvQuery {
    pub theme: Option<String>,
}

pub async fn themes() -> Json<ApiEnvelope<Vec<CvTheme>>> {
    let themes = THEMES
        .iter()
        .map(|(id, name)| CvTheme {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
        })
        .collect();
    Json(ApiEnvelope::ok(themes))
}

/// CV for `?theme=`, defaulting to the first theme.
pub async fn cv(Query(query): Query<CvQuery>) -> Result<Json<CvDocument>, (StatusCode, String)> {
    let theme = query.theme.unwrap_or_else(|| THEMES[0].0.to_string());
    if !THEMES.iter().any(|(id, _)| *id == theme) {
        return Err((StatusCode::NOT_FOUND, format!("Unknown theme: {theme}")));
    }

    Ok(Json(CvDocument {
        experiences: vec![CvExperience {
            title: "Software Engineer".to_string(),
            company: "Example Corp".to_string(),
            description: format!("{theme} work"),
            start_date: "2021-01-01".to_string(),
            end_date: None,
            technologies: vec!["rust".to_string(), "go".to_string()],
        }],
        skills: vec![CvSkill {
            name: "Rust".to_string(),
            level: "expert".to_string(),
            category: Some(theme.clone()),
        }],
        projects: vec![CvProject {
            title: "maicivy".to_string(),
            description: "Interactive CV".to_string(),
            github_url: None,
            technologies: vec!["rust".to_string()],
        }],
        theme,
    }))
}
