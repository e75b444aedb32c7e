//! HTTP API handlers for speakfit-api

pub mod auth;
pub mod health;
pub mod recordings;
pub mod sessions;
pub mod views;

pub use auth::{auth_middleware, CurrentUser};
pub use health::health_routes;
pub use recordings::store_recording;
pub use sessions::{list_sessions, show_session, start_session};
