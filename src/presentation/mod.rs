// Presentation layer - HTTP binding for the workout controller
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod router;
