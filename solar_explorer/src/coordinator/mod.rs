//! Application coordinator: the only stateful decision-maker.
//!
//! Clicks, control actions, REST replies and push events all funnel through
//! [`Coordinator`], which mutates its own state and drives the scene and the
//! transport. It never touches Bevy directly, so it runs the same against the
//! real renderer and against test doubles.

mod panel;
mod selection;
mod systems;

use bevy::color::Color;
use bevy::log::{debug, error, info, warn};
use bevy::prelude::Resource;

use crate::data::{ApiReply, ApiRequest, PushEvent, Transport};
use crate::scene::SolarScene;

pub use panel::{
    format_speed, format_time, InfoPanel, LoadingState, SimulationControls, BOOTSTRAP_ERROR,
    DEFAULT_LINES, DEFAULT_TITLE,
};
pub use selection::{Selection, SelectionChange, MAX_SELECTION};
pub use systems::{coordinator_plugin, BodyClicked, UiAction};

/// Ring color for the body shown in the info panel.
pub const INFO_HIGHLIGHT: Color = Color::srgb(0.0, 1.0, 1.0);
/// Ring color for bodies in the comparison selection.
pub const SELECTION_HIGHLIGHT: Color = Color::srgb(0.0, 1.0, 0.0);

#[derive(Resource, Debug)]
pub struct Coordinator {
    selection: Selection,
    connected: bool,
    controls: SimulationControls,
    speed_display: String,
    time_display: String,
    panel: InfoPanel,
    loading: LoadingState,
}

impl Default for Coordinator {
    fn default() -> Self {
        let controls = SimulationControls::default();
        Self {
            selection: Selection::default(),
            connected: false,
            speed_display: format_speed(controls.speed),
            time_display: format_time(0.0),
            controls,
            panel: InfoPanel::Default,
            loading: LoadingState::Loading,
        }
    }
}

impl Coordinator {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn controls(&self) -> SimulationControls {
        self.controls
    }

    pub fn speed_display(&self) -> &str {
        &self.speed_display
    }

    pub fn time_display(&self) -> &str {
        &self.time_display
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    /// Kicks off the one-shot bootstrap: the catalog fetch. The scene, push
    /// channel and UI follow once it succeeds.
    pub fn start(&mut self, transport: &dyn Transport) {
        info!("initializing solar system explorer");
        self.loading = LoadingState::Loading;
        transport.dispatch(ApiRequest::FetchBodies);
    }

    pub fn on_body_click(
        &mut self,
        name: &str,
        shift: bool,
        scene: &mut dyn SolarScene,
        transport: &dyn Transport,
    ) {
        if shift {
            self.toggle_selection(name, scene, transport);
        } else {
            self.clear_selection(scene);
            transport.dispatch(ApiRequest::FetchBodyInfo(name.to_string()));
        }
    }

    fn toggle_selection(
        &mut self,
        name: &str,
        scene: &mut dyn SolarScene,
        transport: &dyn Transport,
    ) {
        match self.selection.toggle(name) {
            SelectionChange::Removed(removed) => scene.remove_highlight(&removed),
            SelectionChange::Added { name, evicted } => {
                if let Some(oldest) = evicted {
                    scene.remove_highlight(&oldest);
                }
                scene.highlight_body(&name, SELECTION_HIGHLIGHT);
            }
        }

        if let Some((first, second)) = self.selection.pair() {
            transport.dispatch(ApiRequest::FetchRelationship(
                first.to_string(),
                second.to_string(),
            ));
        } else if let Some(only) = self.selection.first() {
            self.panel = InfoPanel::SelectionPrompt {
                name: only.to_string(),
            };
        } else {
            self.panel = InfoPanel::Default;
        }
    }

    /// Drops the selection, every highlight, and resets the info panel.
    pub fn clear_selection(&mut self, scene: &mut dyn SolarScene) {
        self.selection.clear();
        scene.clear_all_highlights();
        self.panel = InfoPanel::Default;
    }

    pub fn toggle_pause(&mut self, transport: &dyn Transport) {
        transport.dispatch(ApiRequest::TogglePause);
    }

    pub fn reset(&mut self, transport: &dyn Transport) {
        transport.dispatch(ApiRequest::Reset);
    }

    /// Shows the new speed at once; the server's answer may still correct it.
    pub fn set_speed(&mut self, speed: f32, transport: &dyn Transport) {
        self.controls.speed = speed;
        self.speed_display = format_speed(speed);
        transport.dispatch(ApiRequest::SetSpeed(speed));
    }

    /// Applies a completed REST call. Replies land in completion order; a
    /// stale reply simply overwrites newer state.
    pub fn on_reply(
        &mut self,
        reply: ApiReply,
        scene: &mut dyn SolarScene,
        transport: &dyn Transport,
    ) {
        match reply {
            ApiReply::Bodies(Ok(catalog)) => {
                if self.loading != LoadingState::Loading {
                    warn!("ignoring body catalog received after startup");
                    return;
                }
                info!("fetched {} bodies", catalog.len());
                scene.create_bodies(&catalog);
                transport.open_push_channel();
                transport.dispatch(ApiRequest::SimulationState);
                self.loading = LoadingState::Ready;
                info!("application initialized");
            }
            ApiReply::Bodies(Err(err)) => {
                error!("failed to initialize application: {err}");
                self.loading = LoadingState::Failed(BOOTSTRAP_ERROR.to_string());
            }
            ApiReply::BodyInfo { result, name } => match result {
                Ok(info) => {
                    scene.clear_all_highlights();
                    scene.highlight_body(&info.name, INFO_HIGHLIGHT);
                    self.panel = InfoPanel::Body(info);
                }
                Err(err) => error!("error showing info for {name}: {err}"),
            },
            ApiReply::Relationship {
                first,
                second,
                result,
            } => match result {
                Ok(rel) => self.panel = InfoPanel::Relationship(rel),
                Err(err) => error!("error showing relationship {first} & {second}: {err}"),
            },
            ApiReply::Paused(result) => match result {
                Ok(resp) => self.controls.paused = resp.paused,
                Err(err) => error!("error toggling pause: {err}"),
            },
            ApiReply::Reset(result) => match result {
                Ok(resp) => {
                    self.clear_selection(scene);
                    self.time_display = format_time(0.0);
                    scene.update_positions(&resp.positions);
                    transport.request_update();
                    transport.dispatch(ApiRequest::SimulationState);
                }
                Err(err) => error!("error resetting simulation: {err}"),
            },
            ApiReply::Speed { requested, result } => match result {
                // Only the answer to the latest request may correct the mirror.
                Ok(_) if requested != self.controls.speed => {
                    debug!("ignoring stale speed reply for {requested}");
                }
                Ok(resp) => {
                    self.controls.speed = resp.speed;
                    self.speed_display = format_speed(resp.speed);
                }
                Err(err) => error!("error setting speed to {requested}: {err}"),
            },
            ApiReply::SimulationState(result) => match result {
                Ok(state) => {
                    self.controls.paused = state.paused;
                    self.controls.speed = state.time_scale;
                    self.speed_display = format_speed(state.time_scale);
                    self.time_display = format_time(state.time);
                }
                Err(err) => error!("error fetching simulation state: {err}"),
            },
        }
    }

    pub fn on_push(&mut self, event: PushEvent, scene: &mut dyn SolarScene) {
        match event {
            PushEvent::Connected => self.connected = true,
            PushEvent::Disconnected => self.connected = false,
            PushEvent::ConnectError(message) => {
                warn!("push channel connection error: {message}");
                self.connected = false;
            }
            PushEvent::InitialState(initial) => {
                info!("initial state received");
                scene.update_positions(&initial.state.positions);
                self.controls.paused = initial.state.paused;
                self.controls.speed = initial.state.time_scale;
                self.speed_display = format_speed(initial.state.time_scale);
            }
            PushEvent::PositionUpdate(update) => {
                scene.update_positions(&update.positions);
                self.time_display = format_time(update.time);
            }
        }
    }
}
