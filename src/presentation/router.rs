// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, list_workouts, map_click, post_event, reset};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/workouts", get(list_workouts))
        .route("/events", post(post_event))
        .route("/map/clicks", post(map_click))
        .route("/reset", post(reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::controller::Controller;
    use crate::application::workout_storage::WorkoutStorage;
    use crate::infrastructure::command_buffer::{CommandMap, CommandSurface};
    use crate::infrastructure::config::MapConfig;
    use crate::infrastructure::memory_store::MemoryStore;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        let storage = WorkoutStorage::new(Arc::new(MemoryStore::new()), "workouts");
        let mut controller = Controller::new(
            CommandMap::new(),
            CommandSurface::new(),
            storage,
            MapConfig::default(),
        );
        controller.hydrate();
        create_router(Arc::new(AppState::new(controller)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app();
        let (status, body) = send(&app, "GET", "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ok".to_string()));
    }

    #[tokio::test]
    async fn test_map_click_before_position_is_conflict() {
        let app = create_test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/map/clicks",
            Some(json!({"lat": 51.5, "lng": -0.1})),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "map_unavailable");
    }

    #[tokio::test]
    async fn test_create_workout_flow() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/events",
            Some(json!({"kind": "position_resolved", "coords": {"lat": 51.5, "lng": -0.1}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ops: Vec<&str> = body["map"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["op"].as_str().unwrap())
            .collect();
        assert_eq!(ops, vec!["initialize", "add_tile_layer", "subscribe_clicks"]);

        let (status, body) = send(
            &app,
            "POST",
            "/map/clicks",
            Some(json!({"lat": 51.5, "lng": -0.1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ui"][0], json!({"op": "show_form", "focus": "distance"}));

        let (status, body) = send(
            &app,
            "POST",
            "/events",
            Some(json!({
                "kind": "form_submitted",
                "form": {"type": "running", "distance": "5", "duration": "30", "cadence": "178"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["map"][0]["op"], "add_marker");
        assert_eq!(body["map"][0]["marker"]["popup"]["class_name"], "running-popup");
        assert_eq!(body["ui"][0]["op"], "prepend_row");

        let (status, body) = send(&app, "GET", "/workouts", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["type"], "running");
        assert_eq!(rows[0]["stats"][2]["value"], "6.0");
    }

    #[tokio::test]
    async fn test_invalid_submission_returns_alert() {
        let app = create_test_app();
        send(
            &app,
            "POST",
            "/events",
            Some(json!({"kind": "position_resolved", "coords": {"lat": 0.0, "lng": 0.0}})),
        )
        .await;
        send(
            &app,
            "POST",
            "/events",
            Some(json!({"kind": "map_clicked", "coords": {"lat": 1.0, "lng": 1.0}})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/events",
            Some(json!({
                "kind": "form_submitted",
                "form": {"type": "cycling", "distance": "0", "duration": "30", "elevation": "10"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ui"][0]["op"], "alert");
        assert_eq!(body["ui"][0]["message"], "Inputs have to be positive numbers!");

        let (_, rows) = send(&app, "GET", "/workouts", None).await;
        assert_eq!(rows, json!([]));
    }

    #[tokio::test]
    async fn test_reset_reloads() {
        let app = create_test_app();
        let (status, body) = send(&app, "POST", "/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ui"], json!([{"op": "reload"}]));
    }
}
