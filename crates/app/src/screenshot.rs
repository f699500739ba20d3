use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

use scenario::loading::DatasetStatus;

/// When set, the app saves one PNG of the fitted map to this path and exits.
pub const SCREENSHOT_ENV: &str = "ENERGY_MAP_SCREENSHOT";

/// Frames to let meshes and materials settle after the dataset is loaded.
const SETTLE_FRAMES: u32 = 30;
/// Frames to wait after requesting the capture before exiting.
const SAVE_FRAMES: u32 = 20;

#[derive(Resource)]
pub struct ScreenshotRequest {
    path: String,
    frames_since_load: u32,
}

impl ScreenshotRequest {
    pub fn new(path: String) -> Self {
        Self {
            path,
            frames_since_load: 0,
        }
    }
}

pub fn drive_screenshot(
    mut commands: Commands,
    mut request: ResMut<ScreenshotRequest>,
    status: Res<DatasetStatus>,
    mut exit: EventWriter<AppExit>,
) {
    match status.as_ref() {
        DatasetStatus::Pending => return,
        DatasetStatus::Failed(reason) => {
            error!("Screenshot skipped, dataset failed to load: {}", reason);
            exit.send(AppExit::error());
            return;
        }
        DatasetStatus::Loaded { .. } => {}
    }

    request.frames_since_load += 1;

    if request.frames_since_load == SETTLE_FRAMES {
        info!("Saving screenshot to {}", request.path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(request.path.clone()));
    } else if request.frames_since_load == SETTLE_FRAMES + SAVE_FRAMES {
        exit.send(AppExit::Success);
    }
}
