// Port for the external map view (tiles, markers, popups, panning)
use crate::application::events::AppEvent;
use crate::domain::coordinates::Coordinates;
use crate::domain::summary::popup_text;
use crate::domain::workout::{Workout, WorkoutKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapHandle(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupOptions {
    /// Popups stay open until dismissed and survive clicks elsewhere on the map
    pub fn for_kind(kind: WorkoutKind) -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub workout_id: String,
    pub coords: Coordinates,
    pub popup_text: String,
    pub popup: PopupOptions,
}

impl Marker {
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            workout_id: workout.id().to_string(),
            coords: workout.coords(),
            popup_text: popup_text(workout),
            popup: PopupOptions::for_kind(workout.kind()),
        }
    }
}

/// Turns a raw click position into the event fed back into the controller
pub type ClickBinding = fn(Coordinates) -> AppEvent;

pub trait MapBackend: Send {
    fn initialize(&mut self, center: Coordinates, zoom: u8) -> MapHandle;

    fn add_tile_layer(&mut self, handle: MapHandle, layer: &TileLayer);

    /// Register the single persistent click handler for this map
    fn on_click(&mut self, handle: MapHandle, binding: ClickBinding);

    /// Place a marker with its popup already open
    fn add_marker(&mut self, handle: MapHandle, marker: &Marker);

    fn remove_marker(&mut self, handle: MapHandle, workout_id: &str);

    /// Animated recenter
    fn pan_to(&mut self, handle: MapHandle, coords: Coordinates, zoom: u8);
}
