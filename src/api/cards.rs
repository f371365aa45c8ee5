//! Card and checklist item endpoints.

use super::{
    SharedState,
    error::ApiError,
    extract::{AppJson, AppPath},
};
use crate::{
    core::{Actor, card, checklist},
    entities::{CardStatus, Plan},
};
use axum::{Json, extract::State, response::IntoResponse};
use sea_orm::prelude::Uuid;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: CardStatus,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub plan: Plan,
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub is_done: bool,
}

pub async fn set_status(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(card::set_status(&state.db, &actor, id, req.status).await?))
}

pub async fn set_plan(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<PlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(card::set_plan(&state.db, &actor, id, req.plan).await?))
}

pub async fn set_notes(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<NotesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(card::set_notes(&state.db, &actor, id, req.notes).await?))
}

pub async fn toggle_checklist_item(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<ToggleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        checklist::toggle(&state.db, &actor, id, req.is_done).await?,
    ))
}
