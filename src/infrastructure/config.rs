use crate::application::map_view::TileLayer;
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Deserialize, Clone)]
pub struct TrackerConfig {
    pub server: ServerSettings,
    pub map: MapConfig,
    pub storage: StorageSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MapConfig {
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: 13,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

impl MapConfig {
    pub fn tile_layer(&self) -> TileLayer {
        TileLayer {
            url_template: self.tile_url.clone(),
            attribution: self.attribution.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub key: String,
    /// Keep workouts in memory only when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Offset whose calendar day appears in workout descriptions
    pub utc_offset_minutes: i32,
}

impl DisplaySettings {
    pub fn utc_offset(&self) -> anyhow::Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "display.utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                )
            })
    }
}

/// Defaults, then `config/tracker.*` if present, then `TRACKER__*` variables
pub fn load_tracker_config() -> anyhow::Result<TrackerConfig> {
    load_with(config::File::with_name("config/tracker").required(false))
}

fn load_with<S>(source: S) -> anyhow::Result<TrackerConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let map = MapConfig::default();
    let settings = config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("map.zoom", i64::from(map.zoom))?
        .set_default("map.tile_url", map.tile_url)?
        .set_default("map.attribution", map.attribution)?
        .set_default("storage.key", "workouts")?
        .set_default("display.utc_offset_minutes", 0_i64)?
        .add_source(source)
        .add_source(config::Environment::with_prefix("TRACKER").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
