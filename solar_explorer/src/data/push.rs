//! Socket.IO push channel: lifecycle and snapshot events into a crossbeam queue.
//!
//! Events are forwarded in arrival order, one message per event. Reconnection
//! is whatever the socket client does by default.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use bevy::log::{debug, info, warn};
use crossbeam_channel::{Receiver, Sender};
use rust_socketio::client::Client;
use rust_socketio::{ClientBuilder, Event, Payload, RawClient};
use url::Url;

use crate::data::model::{InitialState, PositionUpdate};

pub const CONNECT: &str = "connect";
pub const DISCONNECT: &str = "disconnect";
pub const CONNECT_ERROR: &str = "connect_error";
pub const INITIAL_STATE: &str = "initial_state";
pub const POSITION_UPDATE: &str = "position_update";
pub const REQUEST_UPDATE: &str = "request_update";

const EVENT_QUEUE: usize = 256;

/// Inbound push-channel event.
#[derive(Clone, Debug, PartialEq)]
pub enum PushEvent {
    Connected,
    Disconnected,
    ConnectError(String),
    InitialState(InitialState),
    PositionUpdate(PositionUpdate),
}

impl PushEvent {
    /// Wire name of the event this message came from.
    pub fn name(&self) -> &'static str {
        match self {
            PushEvent::Connected => CONNECT,
            PushEvent::Disconnected => DISCONNECT,
            PushEvent::ConnectError(_) => CONNECT_ERROR,
            PushEvent::InitialState(_) => INITIAL_STATE,
            PushEvent::PositionUpdate(_) => POSITION_UPDATE,
        }
    }

    /// Decodes a snapshot event. Malformed or unknown events are logged and
    /// dropped.
    pub fn from_json(event: &str, value: serde_json::Value) -> Option<Self> {
        let decoded = match event {
            INITIAL_STATE => serde_json::from_value(value).map(PushEvent::InitialState),
            POSITION_UPDATE => serde_json::from_value(value).map(PushEvent::PositionUpdate),
            other => {
                warn!("ignoring unknown push event {other:?}");
                return None;
            }
        };
        decoded
            .map_err(|err| warn!("malformed {event} payload: {err}"))
            .ok()
    }
}

/// Handle to the server push channel. The connection is opened lazily by
/// [`PushChannel::open`]; events are drained with [`PushChannel::try_recv`].
pub struct PushChannel {
    url: Url,
    events_tx: Sender<PushEvent>,
    events_rx: Receiver<PushEvent>,
    client: Arc<Mutex<Option<Client>>>,
    /// Tracks the socket lifecycle; a stored client may be disconnected.
    connected: Arc<AtomicBool>,
    opened: AtomicBool,
}

impl PushChannel {
    pub fn new(url: Url) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::bounded(EVENT_QUEUE);
        Self {
            url,
            events_tx,
            events_rx,
            client: Arc::new(Mutex::new(None)),
            connected: Arc::new(AtomicBool::new(false)),
            opened: AtomicBool::new(false),
        }
    }

    /// Connects on a background thread. Only the first call has an effect.
    pub fn open(&self) {
        if self.opened.swap(true, Ordering::SeqCst) {
            debug!("push channel already opened");
            return;
        }

        let url = self.url.clone();
        let tx = self.events_tx.clone();
        let slot = Arc::clone(&self.client);
        let connected = Arc::clone(&self.connected);
        thread::spawn(move || {
            info!("connecting push channel to {url}");
            match connect(url.as_str(), tx.clone(), connected) {
                Ok(client) => *lock(&slot) = Some(client),
                Err(err) => {
                    warn!("push channel connection failed: {err}");
                    let _ = tx.send(PushEvent::ConnectError(err.to_string()));
                }
            }
        });
    }

    /// Asks the server for an out-of-band `position_update`. Dropped while the
    /// channel is not connected.
    pub fn request_update(&self) {
        if !self.is_connected() {
            debug!("push channel not connected; dropping {REQUEST_UPDATE}");
            return;
        }
        let guard = lock(&self.client);
        let Some(client) = guard.as_ref() else {
            debug!("push client not stored yet; dropping {REQUEST_UPDATE}");
            return;
        };
        if let Err(err) = client.emit(REQUEST_UPDATE, Payload::Text(Vec::new())) {
            warn!("failed to emit {REQUEST_UPDATE}: {err}");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<PushEvent> {
        self.events_rx.try_recv().ok()
    }

    pub fn receiver(&self) -> &Receiver<PushEvent> {
        &self.events_rx
    }

    #[cfg(test)]
    pub(crate) fn sender(&self) -> Sender<PushEvent> {
        self.events_tx.clone()
    }
}

impl Drop for PushChannel {
    fn drop(&mut self) {
        if let Some(client) = lock(&self.client).take() {
            let _ = client.disconnect();
        }
    }
}

fn lock(slot: &Mutex<Option<Client>>) -> MutexGuard<'_, Option<Client>> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn connect(
    url: &str,
    tx: Sender<PushEvent>,
    connected: Arc<AtomicBool>,
) -> Result<Client, rust_socketio::Error> {
    let on_connect = (tx.clone(), Arc::clone(&connected));
    let on_close = (tx.clone(), Arc::clone(&connected));
    let on_error = (tx.clone(), connected);
    let on_initial = tx.clone();
    let on_update = tx;

    ClientBuilder::new(url)
        .on(Event::Connect, move |_: Payload, _: RawClient| {
            info!("push channel connected");
            forward_lifecycle(&on_connect.0, &on_connect.1, PushEvent::Connected);
        })
        .on(Event::Close, move |_: Payload, _: RawClient| {
            info!("push channel disconnected");
            forward_lifecycle(&on_close.0, &on_close.1, PushEvent::Disconnected);
        })
        .on(Event::Error, move |payload: Payload, _: RawClient| {
            let message = describe(&payload);
            warn!("push channel error: {message}");
            forward_lifecycle(&on_error.0, &on_error.1, PushEvent::ConnectError(message));
        })
        .on(INITIAL_STATE, move |payload: Payload, _: RawClient| {
            if let Some(event) = decode_payload(INITIAL_STATE, payload) {
                forward(&on_initial, event);
            }
        })
        .on(POSITION_UPDATE, move |payload: Payload, _: RawClient| {
            if let Some(event) = decode_payload(POSITION_UPDATE, payload) {
                forward(&on_update, event);
            }
        })
        .connect()
}

/// Updates the connected flag before the event reaches the queue, so the
/// gate is already closed when the coordinator sees a disconnect.
fn forward_lifecycle(tx: &Sender<PushEvent>, connected: &AtomicBool, event: PushEvent) {
    connected.store(matches!(event, PushEvent::Connected), Ordering::SeqCst);
    forward(tx, event);
}

fn forward(tx: &Sender<PushEvent>, event: PushEvent) {
    if tx.send(event).is_err() {
        debug!("push receiver dropped");
    }
}

fn decode_payload(event: &str, payload: Payload) -> Option<PushEvent> {
    match payload {
        Payload::Text(mut values) if !values.is_empty() => {
            PushEvent::from_json(event, values.swap_remove(0))
        }
        other => {
            warn!("ignoring {event} with unexpected payload {other:?}");
            None
        }
    }
}

fn describe(payload: &Payload) -> String {
    match payload {
        Payload::Text(values) => values
            .iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => format!("{other:?}"),
    }
}
