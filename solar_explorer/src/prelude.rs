//! Minimal prelude for SDK consumers.

pub use crate::config::server_config;
pub use crate::coordinator::{BodyClicked, Coordinator, UiAction};
pub use crate::data::{ApiClient, ApiError, BodyCatalog, PositionMap, ServerConfig, Transport};
pub use crate::scene::SolarScene;
pub use crate::sdk::SolarExplorerBuilder;
