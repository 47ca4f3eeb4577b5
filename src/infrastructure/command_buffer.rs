// Map and surface adapters that queue render commands for a remote front-end
use crate::application::events::AppEvent;
use crate::application::map_view::{ClickBinding, MapBackend, MapHandle, Marker, TileLayer};
use crate::application::surface::{FormField, Surface};
use crate::domain::coordinates::Coordinates;
use crate::domain::summary::WorkoutSummary;
use crate::domain::workout::WorkoutKind;
use serde::Serialize;

/// Seconds a pan animation takes
const PAN_DURATION_SECS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapCommand {
    Initialize {
        handle: MapHandle,
        center: Coordinates,
        zoom: u8,
    },
    AddTileLayer {
        handle: MapHandle,
        layer: TileLayer,
    },
    SubscribeClicks {
        handle: MapHandle,
    },
    AddMarker {
        handle: MapHandle,
        marker: Marker,
    },
    RemoveMarker {
        handle: MapHandle,
        workout_id: String,
    },
    PanTo {
        handle: MapHandle,
        coords: Coordinates,
        zoom: u8,
        animate: bool,
        pan_duration_secs: f64,
    },
}

#[derive(Debug, Default)]
pub struct CommandMap {
    next_handle: u32,
    click_binding: Option<ClickBinding>,
    commands: Vec<MapCommand>,
}

impl CommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a raw click through the registered handler, if any
    pub fn click(&self, coords: Coordinates) -> Option<AppEvent> {
        self.click_binding.map(|binding| binding(coords))
    }

    pub fn drain(&mut self) -> Vec<MapCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl MapBackend for CommandMap {
    fn initialize(&mut self, center: Coordinates, zoom: u8) -> MapHandle {
        self.next_handle += 1;
        let handle = MapHandle(self.next_handle);
        // A new map replaces whatever the previous page registered
        self.click_binding = None;
        self.commands.push(MapCommand::Initialize {
            handle,
            center,
            zoom,
        });
        handle
    }

    fn add_tile_layer(&mut self, handle: MapHandle, layer: &TileLayer) {
        self.commands.push(MapCommand::AddTileLayer {
            handle,
            layer: layer.clone(),
        });
    }

    fn on_click(&mut self, handle: MapHandle, binding: ClickBinding) {
        self.click_binding = Some(binding);
        self.commands.push(MapCommand::SubscribeClicks { handle });
    }

    fn add_marker(&mut self, handle: MapHandle, marker: &Marker) {
        self.commands.push(MapCommand::AddMarker {
            handle,
            marker: marker.clone(),
        });
    }

    fn remove_marker(&mut self, handle: MapHandle, workout_id: &str) {
        self.commands.push(MapCommand::RemoveMarker {
            handle,
            workout_id: workout_id.to_string(),
        });
    }

    fn pan_to(&mut self, handle: MapHandle, coords: Coordinates, zoom: u8) {
        self.commands.push(MapCommand::PanTo {
            handle,
            coords,
            zoom,
            animate: true,
            pan_duration_secs: PAN_DURATION_SECS,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiCommand {
    ShowForm { focus: FormField },
    HideForm,
    ShowMetricField { workout_type: WorkoutKind },
    PrependRow { row: WorkoutSummary },
    RemoveRow { id: String },
    ClearRows,
    Alert { message: String },
    Reload,
}

#[derive(Debug, Default)]
pub struct CommandSurface {
    commands: Vec<UiCommand>,
}

impl CommandSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for CommandSurface {
    fn show_form(&mut self, focus: FormField) {
        self.commands.push(UiCommand::ShowForm { focus });
    }

    fn hide_form(&mut self) {
        self.commands.push(UiCommand::HideForm);
    }

    fn show_metric_field(&mut self, kind: WorkoutKind) {
        self.commands.push(UiCommand::ShowMetricField { workout_type: kind });
    }

    fn prepend_row(&mut self, row: &WorkoutSummary) {
        self.commands.push(UiCommand::PrependRow { row: row.clone() });
    }

    fn remove_row(&mut self, workout_id: &str) {
        self.commands.push(UiCommand::RemoveRow {
            id: workout_id.to_string(),
        });
    }

    fn clear_rows(&mut self) {
        self.commands.push(UiCommand::ClearRows);
    }

    fn alert(&mut self, message: &str) {
        self.commands.push(UiCommand::Alert {
            message: message.to_string(),
        });
    }

    fn reload(&mut self) {
        self.commands.push(UiCommand::Reload);
    }
}
