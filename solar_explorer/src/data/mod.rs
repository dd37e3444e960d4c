mod api;
mod channel;
mod model;
mod push;

use std::time::Duration;

use url::Url;

pub use api::{ApiClient, ApiError};
pub use channel::{spawn_request_worker, ApiReply, ApiRequest, ServerLink, Transport};
pub use model::{
    BodyCatalog, BodyData, BodyInfo, InitialState, PauseResponse, Position, PositionMap,
    PositionUpdate, Relationship, ResetResponse, SimulationState, SpeedResponse,
};
pub use push::{PushChannel, PushEvent};

/// Where the simulation server lives and how long a single request may take.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
}
