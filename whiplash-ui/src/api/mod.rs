//! HTTP API handlers for whiplash-ui

pub mod health;
pub mod mood;
pub mod ui;

pub use health::health_routes;
pub use mood::mood_routes;
pub use ui::ui_routes;
