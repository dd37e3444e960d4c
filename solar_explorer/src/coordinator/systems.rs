//! Bevy wiring for the coordinator: drains transport queues and UI events.

use bevy::prelude::*;

use crate::coordinator::Coordinator;
use crate::data::ServerLink;
use crate::scene::BevyScene;

/// A pointer click that landed on a body.
#[derive(Event, Clone, Debug, PartialEq)]
pub struct BodyClicked {
    pub name: String,
    pub shift: bool,
}

/// Control actions raised by the HUD, the info panel and keyboard shortcuts.
#[derive(Event, Clone, Debug, PartialEq)]
pub enum UiAction {
    TogglePause,
    Reset,
    SetSpeed(f32),
    ClearSelection,
}

pub fn coordinator_plugin(app: &mut App) {
    app.init_resource::<Coordinator>()
        .add_event::<BodyClicked>()
        .add_event::<UiAction>()
        .add_systems(Startup, start_session)
        .add_systems(
            Update,
            (
                handle_body_clicks,
                apply_ui_actions,
                drain_api_replies,
                drain_push_events,
            )
                .chain(),
        );
}

fn start_session(mut coordinator: ResMut<Coordinator>, link: Res<ServerLink>) {
    coordinator.start(&*link);
}

fn handle_body_clicks(
    mut clicks: EventReader<BodyClicked>,
    mut coordinator: ResMut<Coordinator>,
    mut scene: BevyScene,
    link: Res<ServerLink>,
) {
    for click in clicks.read() {
        coordinator.on_body_click(&click.name, click.shift, &mut scene, &*link);
    }
}

fn apply_ui_actions(
    mut actions: EventReader<UiAction>,
    mut coordinator: ResMut<Coordinator>,
    mut scene: BevyScene,
    link: Res<ServerLink>,
) {
    for action in actions.read() {
        match *action {
            UiAction::TogglePause => coordinator.toggle_pause(&*link),
            UiAction::Reset => coordinator.reset(&*link),
            UiAction::SetSpeed(speed) => coordinator.set_speed(speed, &*link),
            UiAction::ClearSelection => coordinator.clear_selection(&mut scene),
        }
    }
}

fn drain_api_replies(
    mut coordinator: ResMut<Coordinator>,
    mut scene: BevyScene,
    link: Res<ServerLink>,
) {
    while let Some(reply) = link.try_recv_reply() {
        coordinator.on_reply(reply, &mut scene, &*link);
    }
}

/// Applies every queued push event in arrival order. No coalescing: each
/// snapshot is applied even if a newer one is already waiting.
fn drain_push_events(
    mut coordinator: ResMut<Coordinator>,
    mut scene: BevyScene,
    link: Res<ServerLink>,
) {
    while let Some(event) = link.try_recv_push() {
        coordinator.on_push(event, &mut scene);
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::{Receiver, Sender};

    use super::*;
    use crate::data::{
        ApiReply, ApiRequest, PauseResponse, Position, PositionMap, PositionUpdate, PushChannel,
        PushEvent,
    };
    use crate::scene::{BodyProxy, BodyRegistry};

    struct Harness {
        app: App,
        requests: Receiver<ApiRequest>,
        replies: Sender<ApiReply>,
        push: Sender<PushEvent>,
    }

    fn harness() -> Harness {
        let (request_tx, requests) = crossbeam_channel::unbounded();
        let (replies, reply_rx) = crossbeam_channel::unbounded();
        let channel = PushChannel::new("http://127.0.0.1:9".parse().unwrap());
        let link = ServerLink::from_parts(request_tx, reply_rx, channel);
        let push = link.push_channel().sender();

        let mut registry = BodyRegistry::default();
        registry.insert(
            "Earth",
            BodyProxy {
                radius: 1.0,
                position: Vec3::ZERO,
                mesh: Entity::PLACEHOLDER,
                label: Entity::PLACEHOLDER,
                ring: None,
            },
        );

        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(registry)
            .insert_resource(link)
            .add_plugins(coordinator_plugin);

        Harness {
            app,
            requests,
            replies,
            push,
        }
    }

    fn earth_at(x: f32, time: f64) -> PushEvent {
        let mut positions = PositionMap::new();
        positions.insert("Earth".into(), Position { x, y: 0.0, z: 0.0 });
        PushEvent::PositionUpdate(PositionUpdate {
            positions,
            time,
            paused: false,
        })
    }

    #[test]
    fn queued_push_events_apply_in_arrival_order_within_one_frame() {
        let mut harness = harness();
        for event in [
            PushEvent::Connected,
            earth_at(1.0, 1.0),
            earth_at(2.0, 2.5),
            PushEvent::Disconnected,
        ] {
            harness.push.send(event).unwrap();
        }

        harness.app.update();

        assert!(harness.push.is_empty());
        let world = harness.app.world();
        let earth = world.resource::<BodyRegistry>().get("Earth").unwrap();
        assert_eq!(earth.position, Vec3::new(2.0, 0.0, 0.0));
        let coordinator = world.resource::<Coordinator>();
        assert_eq!(coordinator.time_display(), "2.50");
        assert!(!coordinator.is_connected());
    }

    #[test]
    fn clicks_actions_and_replies_reach_the_coordinator() {
        let mut harness = harness();
        harness.app.update();
        let sent: Vec<_> = harness.requests.try_iter().collect();
        assert_eq!(sent, [ApiRequest::FetchBodies]);

        harness.app.world_mut().send_event(BodyClicked {
            name: "Earth".into(),
            shift: true,
        });
        harness.app.world_mut().send_event(UiAction::SetSpeed(2.5));
        harness
            .replies
            .send(ApiReply::Paused(Ok(PauseResponse {
                paused: true,
                time: 3.0,
            })))
            .unwrap();
        harness.app.update();

        let sent: Vec<_> = harness.requests.try_iter().collect();
        assert_eq!(sent, [ApiRequest::SetSpeed(2.5)]);
        let world = harness.app.world();
        let coordinator = world.resource::<Coordinator>();
        assert!(coordinator.selection().contains("Earth"));
        assert_eq!(coordinator.speed_display(), "2.5x");
        assert!(coordinator.controls().paused);
        let earth = world.resource::<BodyRegistry>().get("Earth").unwrap();
        assert!(earth.ring.is_some());
    }
}
