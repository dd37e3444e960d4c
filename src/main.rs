//! Orrery: solar system explorer. Runs the solar_explorer app.

use bevy::prelude::*;
use solar_explorer::sdk::SolarExplorerBuilder;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();

    SolarExplorerBuilder::new().server_config().build().run()
}
