// HTTP request handlers
use crate::application::events::AppEvent;
use crate::domain::coordinates::Coordinates;
use crate::domain::summary::WorkoutSummary;
use crate::infrastructure::command_buffer::{MapCommand, UiCommand};
use crate::presentation::app_state::{AppState, TrackerController};
use crate::presentation::error::ApiError;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Commands produced while handling one event, applied in order by the front-end
#[derive(Debug, Default, Serialize)]
pub struct RenderBatch {
    pub map: Vec<MapCommand>,
    pub ui: Vec<UiCommand>,
}

impl RenderBatch {
    fn drain(controller: &mut TrackerController) -> Self {
        Self {
            map: controller.map_mut().drain(),
            ui: controller.surface_mut().drain(),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Sidebar rows, newest first
pub async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutSummary>> {
    let controller = state.controller.lock().await;
    Json(controller.summaries())
}

/// Apply one UI event
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<AppEvent>,
) -> Result<Json<RenderBatch>, ApiError> {
    let mut controller = state.controller.lock().await;
    apply(&mut controller, event)
}

/// Raw map click, routed through the handler the map registered
pub async fn map_click(
    State(state): State<Arc<AppState>>,
    Json(coords): Json<Coordinates>,
) -> Result<Json<RenderBatch>, ApiError> {
    let mut controller = state.controller.lock().await;
    let event = controller
        .map_mut()
        .click(coords)
        .ok_or(ApiError::MapUnavailable)?;
    apply(&mut controller, event)
}

/// Clear saved workouts and start over
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<RenderBatch>, ApiError> {
    let mut controller = state.controller.lock().await;
    apply(&mut controller, AppEvent::Reset)
}

fn apply(controller: &mut TrackerController, event: AppEvent) -> Result<Json<RenderBatch>, ApiError> {
    let result = controller.dispatch(event);
    // Buffers are emptied whether or not dispatch succeeded
    let batch = RenderBatch::drain(controller);
    result?;
    Ok(Json(batch))
}
