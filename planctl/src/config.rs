//! Configuration file for `planctl`.
//!
//! ```hcl
//! version = 1
//!
//! engine {
//!   url     = "http://localhost:8000"
//!   timeout = 10
//! }
//!
//! debounce = 300
//! settings = "/home/me/.config/navplot/settings.json"
//! ```
//!
//! Everything is optional besides `version`.
//!

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use navplot_common::Versioned;

/// Current version
pub const CVERSION: usize = 1;

/// Default engine URL
const DEF_URL: &str = "http://localhost:8000";
/// Default engine timeout (s)
const DEF_TIMEOUT: u64 = 10;
/// Default debounce (ms)
const DEF_DEBOUNCE: u64 = 300;

/// Where the navigation log engine lives.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub url: String,
    /// Seconds
    pub timeout: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            url: DEF_URL.to_string(),
            timeout: DEF_TIMEOUT,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub version: usize,
    #[serde(default)]
    pub engine: EngineConfig,
    /// Milliseconds between the last change and the recompute
    #[serde(default = "def_debounce")]
    pub debounce: u64,
    /// Settings file, `settings.json` in the configuration directory otherwise
    pub settings: Option<PathBuf>,
}

fn def_debounce() -> u64 {
    DEF_DEBOUNCE
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: CVERSION,
            engine: EngineConfig::default(),
            debounce: DEF_DEBOUNCE,
            settings: None,
        }
    }
}

impl Versioned for Config {
    const VERSION: usize = CVERSION;

    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full() {
        let s = r##"
version = 1

engine {
  url     = "http://planner.local:8080"
  timeout = 3
}

debounce = 150
settings = "/tmp/settings.json"
"##;
        let cfg: Config = hcl::from_str(s).unwrap();

        assert_eq!("http://planner.local:8080", cfg.engine.url);
        assert_eq!(Duration::from_secs(3), cfg.engine.timeout());
        assert_eq!(Duration::from_millis(150), cfg.debounce());
        assert_eq!(Some(PathBuf::from("/tmp/settings.json")), cfg.settings);
    }

    #[test]
    fn test_minimal() {
        let cfg: Config = hcl::from_str("version = 1\n").unwrap();

        assert_eq!(Config::default(), cfg);
        assert_eq!(Duration::from_millis(300), cfg.debounce());
    }

    #[test]
    fn test_partial_engine() {
        let cfg: Config = hcl::from_str("version = 1\nengine {\n  timeout = 2\n}\n").unwrap();

        assert_eq!(DEF_URL, cfg.engine.url);
        assert_eq!(2, cfg.engine.timeout);
    }
}
