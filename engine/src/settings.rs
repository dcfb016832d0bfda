//! Persisted user settings.
//!
//! Stored as a flat JSON object, one key per setting.  Loading never fails: a missing or
//! unreadable file gives the defaults and every key that does not decode falls back to its own
//! default without touching the others.
//!

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use tracing::{debug, trace, warn};

use crate::{FlightParams, Route, SettingsError, DEF_WIDTH, MAX_WIDTH, MIN_WIDTH};

/// Default file name.
pub const SETTINGS_FILE: &str = "settings.json";

/// Keys as found in the file.
///
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, Eq, PartialEq)]
#[strum(serialize_all = "camelCase")]
pub enum Key {
    Route,
    Tas,
    WindDirection,
    WindSpeed,
    MagneticDeclination,
    SidebarWidth,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub route: Route,
    pub tas: u32,
    pub wind_direction: u32,
    pub wind_speed: u32,
    pub magnetic_declination: i32,
    pub sidebar_width: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let params = FlightParams::default();
        Settings {
            route: Route::new(),
            tas: params.tas,
            wind_direction: params.wind_direction,
            wind_speed: params.wind_speed,
            magnetic_declination: params.magnetic_declination,
            sidebar_width: DEF_WIDTH,
        }
    }
}

impl Settings {
    pub fn params(&self) -> FlightParams {
        FlightParams {
            tas: self.tas,
            wind_direction: self.wind_direction,
            wind_speed: self.wind_speed,
            magnetic_declination: self.magnetic_declination,
        }
    }

    pub fn set_params(&mut self, params: &FlightParams) {
        self.tas = params.tas;
        self.wind_direction = params.wind_direction;
        self.wind_speed = params.wind_speed;
        self.magnetic_declination = params.magnetic_declination;
    }
}

/// Decode one key, default if absent or bad.
///
fn decode<T: DeserializeOwned>(map: &Map<String, Value>, key: Key, def: T) -> T {
    match map.get(key.as_ref()) {
        None => def,
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            warn!("settings: bad value for {}: {e}", key.as_ref());
            def
        }),
    }
}

#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: &Path) -> Self {
        SettingsStore {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Settings {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                debug!("no settings ({e}), using defaults");
                return Settings::default();
            }
        };

        let map = match serde_json::from_str::<Value>(&data) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("settings: not an object, using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!("settings: {e}, using defaults");
                return Settings::default();
            }
        };

        let unknown: Vec<&String> = map
            .keys()
            .filter(|k| !Key::iter().any(|key| key.as_ref() == k.as_str()))
            .collect();
        if !unknown.is_empty() {
            trace!("ignoring {:?}", unknown);
        }

        let def = Settings::default();
        Settings {
            route: decode(&map, Key::Route, def.route),
            tas: decode(&map, Key::Tas, def.tas),
            wind_direction: decode(&map, Key::WindDirection, def.wind_direction) % 360,
            wind_speed: decode(&map, Key::WindSpeed, def.wind_speed),
            magnetic_declination: decode(&map, Key::MagneticDeclination, def.magnetic_declination),
            sidebar_width: decode(&map, Key::SidebarWidth, def.sidebar_width)
                .clamp(MIN_WIDTH, MAX_WIDTH),
        }
    }

    #[tracing::instrument(skip(self, settings), fields(path = %self.path.display()))]
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let data = serde_json::to_string_pretty(settings)?;

        let write = |e| SettingsError::Write(self.path.to_string_lossy().to_string(), e);
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(write)?;
            }
        }
        fs::write(&self.path, data).map_err(write)?;
        trace!("settings saved");
        Ok(())
    }
}
