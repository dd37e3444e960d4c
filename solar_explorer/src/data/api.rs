//! Blocking HTTP client for the simulation server's REST surface.
//!
//! Every call logs its failure with context and hands the error back to the
//! caller; retries are the caller's business (and nobody does them).

use bevy::log::error;
use serde::de::DeserializeOwned;
use url::Url;

use crate::data::model::{
    BodyCatalog, BodyInfo, PauseResponse, Relationship, ResetResponse, SimulationState,
    SpeedRequest, SpeedResponse,
};
use crate::data::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed with status {status}")]
    RequestFailed { endpoint: String, status: u16 },
    #[error("network error on {endpoint}: {message}")]
    Network { endpoint: String, message: String },
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// REST client bound to one server. Cheap to clone; clones share the
/// connection pool.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(config: &ServerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.request_timeout)
            .build();
        Self {
            base_url: config.base_url.clone(),
            agent,
        }
    }

    pub fn fetch_bodies(&self) -> Result<BodyCatalog, ApiError> {
        self.get(&["api", "bodies"], "fetch bodies")
    }

    pub fn fetch_body_info(&self, name: &str) -> Result<BodyInfo, ApiError> {
        self.get(&["api", "body", name], "fetch body info")
    }

    pub fn fetch_relationship(&self, first: &str, second: &str) -> Result<Relationship, ApiError> {
        self.get(&["api", "relationship", first, second], "fetch relationship")
    }

    pub fn toggle_pause(&self) -> Result<PauseResponse, ApiError> {
        let url = self.endpoint(&["api", "simulation", "pause"]);
        let result = self.agent.post(url.as_str()).call();
        finish(&url, "toggle pause", result)
    }

    pub fn reset_simulation(&self) -> Result<ResetResponse, ApiError> {
        let url = self.endpoint(&["api", "simulation", "reset"]);
        let result = self.agent.post(url.as_str()).call();
        finish(&url, "reset simulation", result)
    }

    pub fn set_speed(&self, speed: f32) -> Result<SpeedResponse, ApiError> {
        let url = self.endpoint(&["api", "simulation", "speed"]);
        let result = self
            .agent
            .post(url.as_str())
            .send_json(SpeedRequest { speed });
        finish(&url, "set speed", result)
    }

    pub fn get_simulation_state(&self) -> Result<SimulationState, ApiError> {
        self.get(&["api", "simulation", "state"], "fetch simulation state")
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str], action: &str) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        let result = self.agent.get(url.as_str()).call();
        finish(&url, action, result)
    }

    /// Appends `segments` to the base URL, percent-encoding each one so body
    /// names with spaces or slashes stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn finish<T: DeserializeOwned>(
    url: &Url,
    action: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    let outcome = decode(url.as_str(), result);
    if let Err(err) = &outcome {
        error!("failed to {action}: {err}");
    }
    outcome
}

fn decode<T: DeserializeOwned>(
    endpoint: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    let response = result.map_err(|err| match err {
        ureq::Error::Status(status, _) => ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => ApiError::Network {
            endpoint: endpoint.to_string(),
            message: transport.to_string(),
        },
    })?;

    response.into_json::<T>().map_err(|err| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}
