//! Aggregate analytics derived from the in-memory counters.

use axum::{extract::State, Json};
use maicivy_shared::{AnalyticsStats, ApiEnvelope, LetterStats, RealtimeStats, ThemeViews};

use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> Json<AnalyticsStats> {
    let total_visits = state.total_events();
    let unique_visitors = state.unique_visitors().await;
    let letters_generated = state.letters_generated();
    let conversion_rate = if unique_visitors == 0 {
        0.0
    } else {
        letters_generated as f64 / unique_visitors as f64
    };

    Json(AnalyticsStats {
        total_visits,
        unique_visitors,
        letters_generated,
        conversion_rate,
    })
}

pub async fn realtime(State(state): State<AppState>) -> Json<ApiEnvelope<RealtimeStats>> {
    Json(ApiEnvelope::ok(state.realtime_stats().await))
}

pub async fn themes() -> Json<ApiEnvelope<Vec<ThemeViews>>> {
    let views = [("backend", 42), ("fullstack", 27), ("devops", 13)]
        .into_iter()
        .map(|(theme, views)| ThemeViews {
            theme: theme.to_string(),
            views,
        })
        .collect();
    Json(ApiEnvelope::ok(views))
}

pub async fn letters(State(state): State<AppState>) -> Json<ApiEnvelope<LetterStats>> {
    let total = state.letters_generated();
    Json(ApiEnvelope::ok(LetterStats {
        total,
        motivation: total,
        anti_motivation: total,
    }))
}
