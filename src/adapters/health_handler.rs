use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::registry::DescriptorRegistry;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub config: String,
    pub registry: String,
}

pub struct HealthHandler {
    registry: Arc<DescriptorRegistry>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self {
            registry,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let uptime = self.start_time.elapsed().as_secs();
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            checks: HealthChecks {
                config: "ok".to_string(),
                registry: "ok".to_string(),
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - returns 200 once at least one descriptor is
    /// registered
    pub async fn ready(&self) -> impl IntoResponse {
        if self.registry.names().is_empty() {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "not_ready",
                    "message": "No form descriptors registered"
                })),
            )
        } else {
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "ready",
                    "message": "Server is ready to accept requests"
                })),
            )
        }
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "alive",
                "message": "Server is alive"
            })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormDescriptor;

    #[tokio::test]
    async fn test_health_endpoint() {
        let handler = HealthHandler::new(Arc::new(DescriptorRegistry::new()));
        let response = handler.health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_requires_registered_forms() {
        let registry = Arc::new(DescriptorRegistry::new());
        let handler = HealthHandler::new(registry.clone());

        let response = handler.ready().await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        registry.register(FormDescriptor {
            name: "sample".to_string(),
            title: None,
            description: None,
            layout: None,
            fields: vec![],
        });
        let response = handler.ready().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_live_endpoint() {
        let handler = HealthHandler::new(Arc::new(DescriptorRegistry::new()));
        let response = handler.live().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
