//! Client side of the navigation log engine.
//!
//! The engine does the actual numbers (course, wind correction angle, headings, ground speed and
//! time per leg).  We only see it through the [`NavLogEngine`] trait; [`HttpEngine`] is the
//! implementation talking JSON over HTTP to the real one.
//!

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use clap::{crate_name, crate_version};
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::{EngineError, FlightPlanRequest, FlightPlanResponse};

/// Computing endpoint.
const PLAN_PATH: &str = "/api/v1/flight-plan";
/// Liveness endpoint.
const HEALTH_PATH: &str = "/health";

/// Anything able to turn a route and parameters into a navigation log.
///
#[async_trait]
pub trait NavLogEngine: Debug + Send + Sync {
    async fn compute(&self, req: &FlightPlanRequest) -> Result<FlightPlanResponse, EngineError>;
}

/// Remote engine reached through HTTP.
///
#[derive(Clone, Debug)]
pub struct HttpEngine {
    /// Base URL, without trailing `/`
    base_url: String,
    /// reqwest async client
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct Health {
    status: String,
}

impl HttpEngine {
    #[tracing::instrument]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EngineError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(EngineError::BadUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(format!("{}/{}", crate_name!(), crate_version!()))
            .timeout(timeout)
            .build()?;

        Ok(HttpEngine {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Is the engine up?  Any failure counts as "no".
    ///
    #[tracing::instrument(skip(self))]
    pub async fn health(&self) -> bool {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        trace!("health({url})");

        let resp = match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                debug!("health: status {}", resp.status());
                return false;
            }
            Err(e) => {
                debug!("health: {e}");
                return false;
            }
        };
        matches!(resp.json::<Health>().await, Ok(h) if h.status == "ok")
    }
}

#[async_trait]
impl NavLogEngine for HttpEngine {
    #[tracing::instrument(skip(self, req), fields(points = req.route_points.len()))]
    async fn compute(&self, req: &FlightPlanRequest) -> Result<FlightPlanResponse, EngineError> {
        let url = format!("{}{}", self.base_url, PLAN_PATH);
        trace!("post {url}");

        let resp = self.client.post(&url).json(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("engine answered {status}: {body}");
            return Err(EngineError::Rejected(status.as_u16(), body));
        }

        let plan: FlightPlanResponse = resp.json().await?;
        debug!("got {} rows", plan.nav_log.rows.len());
        Ok(plan)
    }
}
