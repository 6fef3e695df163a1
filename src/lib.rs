//! # FormForge
//!
//! FormForge turns declarative form descriptors into a pair of documents
//! consumable by JSON Forms renderers: a data schema (field types,
//! constraints, required fields) and a UI schema (control placement,
//! labels, layout containers, conditional rules).
//!
//! ## Features
//!
//! - **Declarative descriptors**: forms described as data (fields, groups,
//!   layouts, rules), registered from config files or programmatically
//! - **Declarative layouts**: horizontal/vertical placement with a
//!   default vertical fallthrough for unclaimed fields
//! - **Dynamic sections**: placeholder fields expanded into one subtree per
//!   runtime-supplied item
//! - **Conditional rules**: visibility/enablement conditions with typed
//!   expected values
//! - **Runtime overlays**: per-field enum/label/description/rule overrides
//!   applied after generation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formforge::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Load configuration (formforge.toml + config/forms/*)
//!     let settings = Settings::new()?;
//!     let _ = settings;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! FormForge follows Hexagonal Architecture:
//! - **Domain**: descriptors, schema/uischema trees, the provider port
//! - **Adapters**: the generator core, the descriptor registry, HTTP handlers
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::generator::FormGenerator;
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::registry::DescriptorRegistry;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(registry: Arc<DescriptorRegistry>) -> Router {
    let health_handler = Arc::new(HealthHandler::new(registry.clone()));
    let generator = Arc::new(FormGenerator::new(registry.clone()));

    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_state = ApiState {
        registry,
        generator,
    };

    let api_router = Router::new()
        .route("/forms", get(api_handler::list_forms))
        .route(
            "/forms/:name",
            get(api_handler::get_form).post(api_handler::generate_form),
        )
        .with_state(api_state);

    let router = health_router.nest("/api", api_router);

    router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
