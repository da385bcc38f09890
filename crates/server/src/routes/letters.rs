//! Letter generation stub.

use axum::{extract::State, http::StatusCode, Json};
use maicivy_shared::{GeneratedLetters, LetterRequest, LetterType};
use uuid::Uuid;

use crate::state::AppState;

pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<LetterRequest>,
) -> Result<Json<GeneratedLetters>, (StatusCode, String)> {
    let company = payload.company_name.trim();
    if company.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "company_name is required".to_string()));
    }

    tracing::info!("Generating {:?} letter for {}", payload.letter_type, company);
    state.record_letter();

    let wants_motivation = matches!(payload.letter_type, LetterType::Motivation | LetterType::Both);
    let wants_anti = matches!(payload.letter_type, LetterType::AntiMotivation | LetterType::Both);

    Ok(Json(GeneratedLetters {
        id: Uuid::new_v4().to_string(),
        company_name: company.to_string(),
        motivation: wants_motivation.then(|| format!("Why I want to join {company}.")),
        anti_motivation: wants_anti.then(|| format!("Why {company} should think twice.")),
    }))
}
