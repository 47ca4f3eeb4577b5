// Sidebar row and popup presentation models
use super::workout::{Activity, Workout, WorkoutKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Stat {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// One entry in the sidebar list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    pub title: String,
    pub stats: Vec<Stat>,
}

impl WorkoutSummary {
    pub fn from_workout(workout: &Workout) -> Self {
        let mut stats = vec![
            Stat::new(
                workout.kind().icon(),
                workout.distance_km().to_string(),
                "km",
            ),
            Stat::new("⏰", workout.duration_min().to_string(), "min"),
        ];

        match *workout.activity() {
            Activity::Running { cadence, pace } => {
                stats.push(Stat::new("⚡️", format!("{:.1}", pace), "min/km"));
                stats.push(Stat::new("🦶", cadence.to_string(), "spm"));
            }
            Activity::Cycling {
                elevation_gain,
                speed,
            } => {
                stats.push(Stat::new("⚡️", format!("{:.1}", speed), "km/h"));
                stats.push(Stat::new("⛰️", elevation_gain.to_string(), "m"));
            }
        }

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            title: workout.description().to_string(),
            stats,
        }
    }
}

pub fn popup_text(workout: &Workout) -> String {
    format!("{} {}", workout.kind().icon(), workout.description())
}
