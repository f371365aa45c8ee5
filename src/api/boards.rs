//! Board endpoints.

use super::{
    SharedState,
    error::ApiError,
    extract::{AppJson, AppPath, AppQuery},
};
use crate::{
    core::{
        Actor,
        board::{self, BoardSettingUpdate, NewBoard, ResetSummary},
        progress::PlanFilter,
    },
    entities::CardStatus,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CardsQuery {
    pub lane: CardStatus,
    #[serde(default)]
    pub plan: PlanFilter,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: ResetSummary,
}

pub async fn list_boards(
    State(state): State<SharedState>,
    actor: Actor,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(board::list_boards(&state.db, &actor).await?))
}

pub async fn create_board(
    State(state): State<SharedState>,
    actor: Actor,
    AppJson(request): AppJson<NewBoard>,
) -> Result<impl IntoResponse, ApiError> {
    let created = board::create_board(&state.db, &actor, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn dashboard(
    State(state): State<SharedState>,
    actor: Actor,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(board::get_dashboard(&state.db, &actor).await?))
}

pub async fn get_board(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(board::get_board_view(&state.db, &actor, id).await?))
}

pub async fn list_cards(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<CardsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let cards = board::get_filtered_cards(&state.db, &actor, id, query.lane, query.plan).await?;
    Ok(Json(cards))
}

pub async fn reset_board(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = board::reset_board(&state.db, &actor, id).await?;
    Ok(Json(ResetResponse {
        success: true,
        summary,
    }))
}

pub async fn update_setting(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
    AppJson(update): AppJson<BoardSettingUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        board::update_board_setting(&state.db, &actor, id, update).await?,
    ))
}

pub async fn start_today(
    State(state): State<SharedState>,
    actor: Actor,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(board::start_today(&state.db, &actor, id).await?))
}
