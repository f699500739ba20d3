use bevy::prelude::*;

use scenario::ScenarioSet;

pub mod camera;
pub mod color_ramps;
pub mod egui_input_guard;
pub mod map_layer;
pub mod overlay;
pub mod pattern;
pub mod picking;
pub mod projection;
pub mod style;

use camera::{LeftClickDrag, MapView, MapViewport, ViewRequest};
use egui_input_guard::MapInputGate;
use map_layer::{
    BoldBorderGizmos, HeavyBorderGizmos, MapGeometry, RegionStyles, ThinBorderGizmos,
};
use overlay::OverlayState;
use pattern::PatternTextures;
use picking::{HighlightState, HoverState};
use projection::MapProjection;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>()
            .init_resource::<MapProjection>()
            .init_resource::<MapView>()
            .init_resource::<MapViewport>()
            .init_resource::<MapInputGate>()
            .init_resource::<MapGeometry>()
            .init_resource::<RegionStyles>()
            .init_resource::<PatternTextures>()
            .init_resource::<HoverState>()
            .init_resource::<HighlightState>()
            .init_resource::<LeftClickDrag>()
            .add_event::<ViewRequest>()
            .init_gizmo_group::<ThinBorderGizmos>()
            .init_gizmo_group::<BoldBorderGizmos>()
            .init_gizmo_group::<HeavyBorderGizmos>()
            .add_systems(
                Startup,
                (camera::setup_map_camera, map_layer::configure_border_gizmos),
            )
            // Pointer and keyboard input on the map itself.
            .add_systems(
                Update,
                (
                    picking::update_hover,
                    picking::handle_region_click,
                    camera::camera_left_drag,
                    camera::camera_zoom,
                    camera::camera_pan_keyboard,
                    overlay::cycle_metric_key,
                )
                    .chain()
                    .in_set(ScenarioSet::Input),
            )
            // Everything that reacts to the frame's state changes.
            .add_systems(
                Update,
                (
                    map_layer::build_region_layer,
                    camera::queue_view_requests,
                    camera::handle_view_requests,
                    camera::apply_map_view,
                    picking::update_highlight,
                    map_layer::restyle_regions,
                    map_layer::refresh_pattern_uvs,
                    map_layer::draw_region_borders,
                )
                    .chain()
                    .after(ScenarioSet::Apply),
            );
    }
}
