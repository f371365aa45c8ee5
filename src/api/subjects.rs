//! Subject catalogue endpoint.

use super::{SharedState, error::ApiError, extract::AppQuery};
use crate::core::subject;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubjectsQuery {
    pub grade: i32,
}

/// Subjects for a grade in the configured curriculum country. Needs no actor.
pub async fn list_subjects(
    State(state): State<SharedState>,
    AppQuery(query): AppQuery<SubjectsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let subjects =
        subject::get_subjects_by_grade(&state.db, query.grade, &state.config.country).await?;
    Ok(Json(subjects))
}
