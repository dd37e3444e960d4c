//! Solar explorer: 3D view of a server-driven solar system simulation.
//!
//! Library root: data, coordinator, scene, SDK builder and config modules.

mod camera;
pub mod config;
pub mod coordinator;
pub mod data;
pub mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use coordinator::Coordinator;
pub use data::{ApiClient, ApiError, PushChannel, ServerConfig, ServerLink};
pub use scene::SolarScene;
