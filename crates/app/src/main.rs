use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use scenario::config::MapConfig;

#[cfg(not(target_arch = "wasm32"))]
mod screenshot;

fn main() {
    let config = MapConfig::resolve();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: config.title.clone(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb_u8(0xe8, 0xe6, 0xe1)))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(config)
    .add_plugins((
        scenario::ScenarioPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    // Screenshot mode: renders the loaded map once, saves it and exits
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(path) = std::env::var(screenshot::SCREENSHOT_ENV) {
        app.insert_resource(screenshot::ScreenshotRequest::new(path))
            .add_systems(Update, screenshot::drive_screenshot);
    }

    app.run();
}
