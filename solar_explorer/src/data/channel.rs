use std::thread;

use bevy::log::{debug, error};
use crossbeam_channel::{Receiver, Sender};

use crate::data::api::{ApiClient, ApiError};
use crate::data::model::{
    BodyCatalog, BodyInfo, PauseResponse, Relationship, ResetResponse, SimulationState,
    SpeedResponse,
};
use crate::data::push::{PushChannel, PushEvent};
use crate::data::ServerConfig;

const REQUEST_QUEUE: usize = 64;
const BLOCKING_THREADS: usize = 8;

/// One REST call the coordinator wants made.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiRequest {
    FetchBodies,
    FetchBodyInfo(String),
    FetchRelationship(String, String),
    TogglePause,
    Reset,
    SetSpeed(f32),
    SimulationState,
}

/// Completed REST call, carrying enough of the request to interpret it.
#[derive(Debug)]
pub enum ApiReply {
    Bodies(Result<BodyCatalog, ApiError>),
    BodyInfo {
        name: String,
        result: Result<BodyInfo, ApiError>,
    },
    Relationship {
        first: String,
        second: String,
        result: Result<Relationship, ApiError>,
    },
    Paused(Result<PauseResponse, ApiError>),
    Reset(Result<ResetResponse, ApiError>),
    Speed {
        requested: f32,
        result: Result<SpeedResponse, ApiError>,
    },
    SimulationState(Result<SimulationState, ApiError>),
}

impl ApiRequest {
    /// Runs the call on the current thread.
    pub fn execute(self, client: &ApiClient) -> ApiReply {
        match self {
            ApiRequest::FetchBodies => ApiReply::Bodies(client.fetch_bodies()),
            ApiRequest::FetchBodyInfo(name) => {
                let result = client.fetch_body_info(&name);
                ApiReply::BodyInfo { name, result }
            }
            ApiRequest::FetchRelationship(first, second) => {
                let result = client.fetch_relationship(&first, &second);
                ApiReply::Relationship {
                    first,
                    second,
                    result,
                }
            }
            ApiRequest::TogglePause => ApiReply::Paused(client.toggle_pause()),
            ApiRequest::Reset => ApiReply::Reset(client.reset_simulation()),
            ApiRequest::SetSpeed(speed) => ApiReply::Speed {
                requested: speed,
                result: client.set_speed(speed),
            },
            ApiRequest::SimulationState => {
                ApiReply::SimulationState(client.get_simulation_state())
            }
        }
    }
}

/// Everything the coordinator may ask of the server side.
pub trait Transport {
    /// Queues a REST call; its reply arrives later as an [`ApiReply`].
    fn dispatch(&self, request: ApiRequest);
    fn open_push_channel(&self);
    fn request_update(&self);
}

/// Spawn the request dispatcher on a dedicated thread.
/// Each request runs on the Tokio blocking pool, so overlapping calls proceed
/// concurrently and replies are posted in completion order.
pub fn spawn_request_worker(client: ApiClient) -> (Sender<ApiRequest>, Receiver<ApiReply>) {
    let (request_tx, request_rx) = crossbeam_channel::bounded::<ApiRequest>(REQUEST_QUEUE);
    let (reply_tx, reply_rx) = crossbeam_channel::unbounded();

    thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(BLOCKING_THREADS)
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                error!("failed to build tokio runtime: {err}");
                return;
            }
        };

        while let Ok(request) = request_rx.recv() {
            debug!("dispatching {request:?}");
            let client = client.clone();
            let reply_tx = reply_tx.clone();
            rt.spawn_blocking(move || {
                if reply_tx.send(request.execute(&client)).is_err() {
                    debug!("reply receiver dropped");
                }
            });
        }
    });

    (request_tx, reply_rx)
}

/// Bevy resource bundling the request worker and the push channel.
/// Systems drain both queues every frame.
#[derive(bevy::prelude::Resource)]
pub struct ServerLink {
    requests: Sender<ApiRequest>,
    replies: Receiver<ApiReply>,
    push: PushChannel,
}

impl ServerLink {
    /// Starts the request worker. The push channel stays closed until
    /// [`Transport::open_push_channel`] is called.
    pub fn connect(config: &ServerConfig) -> Self {
        let client = ApiClient::new(config);
        let (requests, replies) = spawn_request_worker(client);
        Self {
            requests,
            replies,
            push: PushChannel::new(config.base_url.clone()),
        }
    }

    /// Link over caller-owned queues and an unopened push channel, so tests
    /// can feed replies and push events without a server.
    #[cfg(test)]
    pub(crate) fn from_parts(
        requests: Sender<ApiRequest>,
        replies: Receiver<ApiReply>,
        push: PushChannel,
    ) -> Self {
        Self {
            requests,
            replies,
            push,
        }
    }

    #[cfg(test)]
    pub(crate) fn push_channel(&self) -> &PushChannel {
        &self.push
    }

    pub fn try_recv_reply(&self) -> Option<ApiReply> {
        self.replies.try_recv().ok()
    }

    pub fn try_recv_push(&self) -> Option<PushEvent> {
        self.push.try_recv()
    }
}

impl Transport for ServerLink {
    fn dispatch(&self, request: ApiRequest) {
        if let Err(err) = self.requests.send(request) {
            error!("request worker is gone; dropping {:?}", err.into_inner());
        }
    }

    fn open_push_channel(&self) {
        self.push.open();
    }

    fn request_update(&self) {
        self.push.request_update();
    }
}
