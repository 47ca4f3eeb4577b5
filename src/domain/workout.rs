// Workout domain model
use super::coordinates::Coordinates;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚵‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkoutError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{kind} record is missing `{field}`")]
    MissingField {
        kind: WorkoutKind,
        field: &'static str,
    },
}

/// Fields shared by every workout variant
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutBase {
    pub coords: Coordinates,
    /// km
    pub distance_km: f64,
    /// min
    pub duration_min: f64,
    pub date: DateTime<Utc>,
    pub id: String,
}

impl WorkoutBase {
    fn check(&self) -> Result<(), WorkoutError> {
        require_positive("distance", self.distance_km)?;
        require_positive("duration", self.duration_min)?;
        require_finite("latitude", self.coords.lat)?;
        require_finite("longitude", self.coords.lng)
    }
}

/// Variant-specific raw field plus the metric derived from it at construction
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    /// cadence in steps/min, pace in min/km
    Running { cadence: f64, pace: f64 },
    /// elevation gain in m, speed in km/h
    Cycling { elevation_gain: f64, speed: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    base: WorkoutBase,
    activity: Activity,
    description: String,
}

impl Workout {
    pub fn running(base: WorkoutBase, cadence: f64) -> Result<Self, WorkoutError> {
        base.check()?;
        require_finite("cadence", cadence)?;
        let pace = base.duration_min / base.distance_km;
        Ok(Self::assemble(base, Activity::Running { cadence, pace }))
    }

    pub fn cycling(base: WorkoutBase, elevation_gain: f64) -> Result<Self, WorkoutError> {
        base.check()?;
        require_finite("elevation", elevation_gain)?;
        let speed = base.distance_km / (base.duration_min / 60.0);
        Ok(Self::assemble(
            base,
            Activity::Cycling {
                elevation_gain,
                speed,
            },
        ))
    }

    fn assemble(base: WorkoutBase, activity: Activity) -> Self {
        let kind = match activity {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        };
        let description = describe(kind, &base.date);
        Self {
            base,
            activity,
            description,
        }
    }

    /// Re-derive the description from the calendar day at `offset`
    pub fn localized(mut self, offset: &FixedOffset) -> Self {
        self.description = describe(self.kind(), &self.base.date.with_timezone(offset));
        self
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.activity {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn coords(&self) -> Coordinates {
        self.base.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.base.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.base.duration_min
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }

    pub fn to_compact(&self) -> CompactRecord {
        let (cadence, elevation) = match self.activity {
            Activity::Running { cadence, .. } => (Some(cadence), None),
            Activity::Cycling { elevation_gain, .. } => (None, Some(elevation_gain)),
        };

        CompactRecord {
            kind: self.kind(),
            coords: self.base.coords.to_pair(),
            distance: self.base.distance_km,
            duration: self.base.duration_min,
            date: self.base.date,
            id: self.base.id.clone(),
            cadence,
            elevation,
        }
    }

    /// Rebuild a workout from storage; derived fields are recomputed.
    pub fn from_compact(record: CompactRecord) -> Result<Self, WorkoutError> {
        let kind = record.kind;
        let (cadence, elevation) = (record.cadence, record.elevation);
        let base = WorkoutBase {
            coords: Coordinates::from_pair(record.coords),
            distance_km: record.distance,
            duration_min: record.duration,
            date: record.date,
            id: record.id,
        };

        match kind {
            WorkoutKind::Running => {
                let cadence = cadence.ok_or(WorkoutError::MissingField {
                    kind,
                    field: "cadence",
                })?;
                Self::running(base, cadence)
            }
            WorkoutKind::Cycling => {
                let elevation = elevation.ok_or(WorkoutError::MissingField {
                    kind,
                    field: "elevation",
                })?;
                Self::cycling(base, elevation)
            }
        }
    }
}

/// Flat projection written to storage. Only this shape is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactRecord {
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    pub coords: [f64; 2],
    pub distance: f64,
    pub duration: f64,
    pub date: DateTime<Utc>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

/// "Running on July 14"; month names are always English.
pub fn describe<Tz>(kind: WorkoutKind, date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{} on {}", kind.label(), date.format("%B %-d"))
}

fn require_finite(field: &'static str, value: f64) -> Result<(), WorkoutError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WorkoutError::NotFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), WorkoutError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(WorkoutError::NotPositive { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base(distance_km: f64, duration_min: f64) -> WorkoutBase {
        WorkoutBase {
            coords: Coordinates::new(51.5, -0.1),
            distance_km,
            duration_min,
            date: Utc.with_ymd_and_hms(2024, 7, 14, 9, 30, 0).unwrap(),
            id: "0123456789".to_string(),
        }
    }

    #[test]
    fn test_running_pace() {
        let workout = Workout::running(base(5.0, 30.0), 178.0).unwrap();
        assert_eq!(workout.kind(), WorkoutKind::Running);
        assert_eq!(workout.pace(), Some(6.0));
        assert_eq!(workout.speed(), None);
    }

    #[test]
    fn test_cycling_speed() {
        let workout = Workout::cycling(base(27.0, 95.0), 523.0).unwrap();
        assert_eq!(workout.speed(), Some(27.0 / (95.0 / 60.0)));
        assert_eq!(workout.pace(), None);
    }

    #[test]
    fn test_description() {
        let workout = Workout::running(base(5.0, 30.0), 178.0).unwrap();
        assert_eq!(workout.description(), "Running on July 14");

        let mut cycling = base(10.0, 40.0);
        cycling.date = Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap();
        let workout = Workout::cycling(cycling, 0.0).unwrap();
        assert_eq!(workout.description(), "Cycling on January 3");
    }

    #[test]
    fn test_localized_description_uses_offset_day() {
        let mut late = base(5.0, 30.0);
        late.date = Utc.with_ymd_and_hms(2024, 7, 15, 2, 30, 0).unwrap();
        let workout = Workout::running(late, 178.0).unwrap();
        assert_eq!(workout.description(), "Running on July 15");

        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        let workout = workout.localized(&west);
        assert_eq!(workout.description(), "Running on July 14");
        assert_eq!(
            workout.to_compact().date,
            Utc.with_ymd_and_hms(2024, 7, 15, 2, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        assert_eq!(
            Workout::running(base(0.0, 30.0), 178.0),
            Err(WorkoutError::NotPositive { field: "distance" })
        );
        assert_eq!(
            Workout::cycling(base(10.0, -1.0), 100.0),
            Err(WorkoutError::NotPositive { field: "duration" })
        );
        assert_eq!(
            Workout::running(base(5.0, 30.0), f64::NAN),
            Err(WorkoutError::NotFinite { field: "cadence" })
        );
    }

    #[test]
    fn test_compact_round_trip_recomputes_derived_fields() {
        let original = Workout::cycling(base(27.0, 95.0), 523.0).unwrap();
        let json = serde_json::to_string(&original.to_compact()).unwrap();
        let record: CompactRecord = serde_json::from_str(&json).unwrap();
        let restored = Workout::from_compact(record).unwrap();

        assert_eq!(restored, original);
        assert_eq!(restored.description(), original.description());
        assert_eq!(restored.speed(), original.speed());
    }

    #[test]
    fn test_compact_shape() {
        let workout = Workout::running(base(5.0, 30.0), 178.0).unwrap();
        let value = serde_json::to_value(workout.to_compact()).unwrap();

        assert_eq!(value["type"], "running");
        assert_eq!(value["coords"], serde_json::json!([51.5, -0.1]));
        assert_eq!(value["distance"], 5.0);
        assert_eq!(value["duration"], 30.0);
        assert_eq!(value["id"], "0123456789");
        assert_eq!(value["cadence"], 178.0);
        assert!(value.get("elevation").is_none());
        assert!(value.get("pace").is_none());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_from_compact_accepts_browser_dates() {
        let json = r#"{"type":"running","coords":[51.5,-0.1],"distance":5,"duration":30,
            "date":"2024-07-14T09:30:00.000Z","id":"0123456789","cadence":178}"#;
        let record: CompactRecord = serde_json::from_str(json).unwrap();
        let workout = Workout::from_compact(record).unwrap();

        assert_eq!(workout, Workout::running(base(5.0, 30.0), 178.0).unwrap());
    }

    #[test]
    fn test_from_compact_requires_variant_field() {
        let mut record = Workout::running(base(5.0, 30.0), 178.0)
            .unwrap()
            .to_compact();
        record.kind = WorkoutKind::Cycling;

        assert_eq!(
            Workout::from_compact(record),
            Err(WorkoutError::MissingField {
                kind: WorkoutKind::Cycling,
                field: "elevation"
            })
        );
    }
}
