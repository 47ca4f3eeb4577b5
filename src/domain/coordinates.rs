// Geographic position shared by map clicks, markers and workouts
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Stored as `[lat, lng]` in compact records
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    pub fn from_pair([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}
