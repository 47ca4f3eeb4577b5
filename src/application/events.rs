// Events delivered to the controller by whatever UI binding drives it
use crate::domain::coordinates::Coordinates;
use crate::domain::form::FormInput;
use crate::domain::workout::WorkoutKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppEvent {
    /// Page loaded; sidebar is rebuilt from the in-memory list
    Started,
    PositionResolved {
        coords: Coordinates,
    },
    PositionUnavailable {
        #[serde(default)]
        reason: String,
    },
    MapClicked {
        coords: Coordinates,
    },
    TypeChanged {
        workout_type: WorkoutKind,
    },
    FormSubmitted {
        form: FormInput,
    },
    FormCancelled,
    WorkoutSelected {
        id: String,
    },
    WorkoutDeleted {
        id: String,
    },
    Reset,
}

impl AppEvent {
    pub fn map_clicked(coords: Coordinates) -> Self {
        AppEvent::MapClicked { coords }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::Started => "started",
            AppEvent::PositionResolved { .. } => "position_resolved",
            AppEvent::PositionUnavailable { .. } => "position_unavailable",
            AppEvent::MapClicked { .. } => "map_clicked",
            AppEvent::TypeChanged { .. } => "type_changed",
            AppEvent::FormSubmitted { .. } => "form_submitted",
            AppEvent::FormCancelled => "form_cancelled",
            AppEvent::WorkoutSelected { .. } => "workout_selected",
            AppEvent::WorkoutDeleted { .. } => "workout_deleted",
            AppEvent::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_browser_events() {
        let event: AppEvent = serde_json::from_str(
            r#"{"kind":"form_submitted","form":{"type":"running","distance":"5","duration":"30","cadence":"178"}}"#,
        )
        .unwrap();
        match event {
            AppEvent::FormSubmitted { form } => {
                assert_eq!(form.kind, WorkoutKind::Running);
                assert_eq!(form.cadence, "178");
                assert_eq!(form.elevation, "");
            }
            other => panic!("unexpected event {:?}", other),
        }

        let event: AppEvent =
            serde_json::from_str(r#"{"kind":"map_clicked","coords":{"lat":51.5,"lng":-0.1}}"#)
                .unwrap();
        assert_eq!(event, AppEvent::map_clicked(Coordinates::new(51.5, -0.1)));

        let event: AppEvent = serde_json::from_str(r#"{"kind":"reset"}"#).unwrap();
        assert_eq!(event.name(), "reset");
    }
}
