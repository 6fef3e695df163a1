//! REST API handlers for form generation.
//!
//! `GET /api/forms` lists registered form types; `GET /api/forms/{name}`
//! generates without runtime metadata; `POST /api/forms/{name}` accepts the
//! dynamic-metadata mapping as its body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::generator::{FormGenerator, GenerateError};
use crate::adapters::registry::DescriptorRegistry;
use crate::domain::DynamicMetadata;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<DescriptorRegistry>,
    pub generator: Arc<FormGenerator>,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// List the names of all registered form types.
pub async fn list_forms(State(state): State<ApiState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.registry.names()))
}

/// Generate a form with no runtime metadata.
pub async fn get_form(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    generate(&state, &name, &DynamicMetadata::new())
}

/// Generate a form, overlaying the dynamic metadata supplied in the body.
pub async fn generate_form(
    State(state): State<ApiState>,
    Path(name): Path<String>,
    Json(dynamic): Json<DynamicMetadata>,
) -> impl IntoResponse {
    generate(&state, &name, &dynamic)
}

fn generate(state: &ApiState, name: &str, dynamic: &DynamicMetadata) -> axum::response::Response {
    match state.generator.generate(name, dynamic) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e @ GenerateError::UnknownType(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}
