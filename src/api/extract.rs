//! Request extractors.
//!
//! The JSON, path and query wrappers only swap axum's plain-text rejections for
//! [`ApiError`] so that every failure has the same body shape.

use super::{SharedState, error::ApiError};
use crate::{core::Actor, errors::Error};
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};

/// `axum::Json` with [`ApiError`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with [`ApiError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// `axum::extract::Query` with [`ApiError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// Reads the acting user from the configured header. A missing or blank header is a 401.
impl FromRequestParts<SharedState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(state.config.actor_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(Error::Unauthenticated)?;
        Ok(Self::new(user_id))
    }
}
