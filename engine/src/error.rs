//! Error module
//!

use thiserror::Error;

/// What is shown inline instead of the navigation log.
///
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PlanError {
    #[error("Wind speed cannot be greater than or equal to TAS")]
    Validation,
    #[error("Failed to compute the navigation log, is the engine running?")]
    Connectivity,
}

/// Failure of a call to the navigation log engine.
///
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("HTTP Error: {0}")]
    HTTP(#[from] reqwest::Error),
    #[error("Engine refused the request ({0}): {1}")]
    Rejected(u16, String),
    #[error("Bad engine URL {0}")]
    BadUrl(String),
    #[error("Engine call aborted: {0}")]
    Aborted(String),
}

/// Problems with the settings file.  Reading never fails, defaults are used instead.
///
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Can not write settings to {0}: {1}")]
    Write(String, std::io::Error),
    #[error("Can not encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}
