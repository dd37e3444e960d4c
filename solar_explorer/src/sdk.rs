//! SDK entry points and builder for composing the solar explorer app.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::camera::orbit_camera_plugin;
use crate::config;
use crate::coordinator::coordinator_plugin;
use crate::data::{ServerConfig, ServerLink};
use crate::scene::scene_plugin;
use crate::ui::{hud_plugin, inspector_plugin, loading_plugin, shortcuts_plugin};

/// Builder for constructing an Orrery app with customizable plugins.
pub struct SolarExplorerBuilder {
    config: Option<ServerConfig>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_orbit_camera: bool,
    enable_hud: bool,
    enable_inspector: bool,
}

impl Default for SolarExplorerBuilder {
    fn default() -> Self {
        Self {
            config: None,
            window_title: "Orrery".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.0, 0.0, 0.067),
            enable_orbit_camera: true,
            enable_hud: true,
            enable_inspector: true,
        }
    }
}

impl SolarExplorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit server configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Read the server configuration from environment variables.
    pub fn server_config(mut self) -> Self {
        self.config = Some(config::server_config());
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_orbit_camera(mut self) -> Self {
        self.enable_orbit_camera = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_inspector(mut self) -> Self {
        self.enable_inspector = false;
        self
    }

    /// Build the Bevy app. Network threads start here; the catalog fetch is
    /// issued on the first `Startup` run.
    pub fn build(self) -> App {
        let config = self.config.unwrap_or_else(config::server_config);
        let link = ServerLink::connect(&config);

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(link)
        .add_plugins((scene_plugin, coordinator_plugin, loading_plugin, shortcuts_plugin));

        if self.enable_orbit_camera {
            app.add_plugins(orbit_camera_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_inspector {
            app.add_plugins(inspector_plugin);
        }

        app
    }
}
