// Wire payloads exchanged with the simulation server.
// Unknown fields are ignored so the server can grow its responses freely.

use std::collections::BTreeMap;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// A point in scene space; Y is up and orbits lie in the XZ plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// Snapshot of body name → position. Partial snapshots only name moved bodies.
pub type PositionMap = BTreeMap<String, Position>;

/// Full catalog keyed by body name, as served by `/api/bodies`.
pub type BodyCatalog = BTreeMap<String, BodyData>;

/// Physical and orbital attributes of one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyData {
    #[serde(default)]
    pub info: String,
    pub radius: f32,
    /// `#rrggbb`
    pub color: String,
    #[serde(default)]
    pub orbital_radius: f64,
    #[serde(default)]
    pub orbital_period: f64,
    #[serde(default)]
    pub current_position: Option<Position>,
}

/// Descriptive record for a single body from `/api/body/{name}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyInfo {
    pub name: String,
    pub info: String,
    pub data: BodyData,
    #[serde(default)]
    pub current_position: Option<Position>,
}

/// Relationship between two bodies. `current_distance` is absent when the
/// server has nothing documented for the pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub body1: String,
    pub body2: String,
    pub relationship: String,
    #[serde(default)]
    pub current_distance: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub time: f64,
    pub paused: bool,
    pub time_scale: f32,
    #[serde(default)]
    pub positions: PositionMap,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PauseResponse {
    pub paused: bool,
    #[serde(default)]
    pub time: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResetResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub positions: PositionMap,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedResponse {
    pub speed: f32,
}

#[derive(Serialize)]
pub(crate) struct SpeedRequest {
    pub speed: f32,
}

/// `initial_state` push payload, sent once per connection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    #[serde(default)]
    pub bodies: BodyCatalog,
    pub state: SimulationState,
}

/// `position_update` push payload, streamed while connected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub positions: PositionMap,
    pub time: f64,
    #[serde(default)]
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ignores_extra_fields_and_accepts_integer_coordinates() {
        let json = r##"{
            "Sun": {"info": "hot", "radius": 10, "color": "#ffff00", "pos": [0, 0, 0],
                    "orbital_radius": 0, "orbital_period": 0,
                    "current_position": {"x": 0, "y": 0, "z": 0}},
            "Earth": {"info": "home", "radius": 1, "color": "#0000ff", "pos": [40, 0, 0],
                      "orbital_radius": 40, "orbital_period": 365,
                      "current_position": {"x": 40.0, "y": 0.0, "z": 0.5}}
        }"##;

        let catalog: BodyCatalog = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.len(), 2);
        let earth = &catalog["Earth"];
        assert_eq!(earth.radius, 1.0);
        assert_eq!(earth.orbital_period, 365.0);
        assert_eq!(
            earth.current_position,
            Some(Position {
                x: 40.0,
                y: 0.0,
                z: 0.5
            })
        );
    }

    #[test]
    fn relationship_without_distance_decodes() {
        let json = r#"{"body1": "Mars", "body2": "Venus",
                       "relationship": "No specific relationship documented.",
                       "current_distance": null}"#;

        let rel: Relationship = serde_json::from_str(json).unwrap();

        assert_eq!(rel.body1, "Mars");
        assert_eq!(rel.current_distance, None);
    }

    #[test]
    fn position_update_carries_partial_snapshot() {
        let json = r#"{"positions": {"Mars": {"x": 1.5, "y": 0, "z": -2}}, "time": 12.345, "paused": false}"#;

        let update: PositionUpdate = serde_json::from_str(json).unwrap();

        assert_eq!(update.positions.len(), 1);
        assert_eq!(Vec3::from(update.positions["Mars"]), Vec3::new(1.5, 0.0, -2.0));
        assert!((update.time - 12.345).abs() < 1e-9);
    }

    #[test]
    fn initial_state_nests_simulation_state() {
        let json = r#"{"bodies": {}, "state": {"time": 3.2, "paused": true, "time_scale": 2.0,
                       "positions": {"Sun": {"x": 0, "y": 0, "z": 0}}}}"#;

        let initial: InitialState = serde_json::from_str(json).unwrap();

        assert!(initial.state.paused);
        assert_eq!(initial.state.time_scale, 2.0);
        assert!(initial.state.positions.contains_key("Sun"));
    }
}
