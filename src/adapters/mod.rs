pub mod api_handler;
pub mod dynamic_section;
pub mod generator;
pub mod health_handler;
pub mod layout;
pub mod overlay;
pub mod registry;
pub mod rules;
