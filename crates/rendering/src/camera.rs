use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use geo::Rect;

use scenario::config::{MapConfig, DEFAULT_CENTER_LAT, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use scenario::loading::DatasetLoaded;
use scenario::search::SearchHit;

use crate::egui_input_guard::{egui_wants_pointer, MapInputGate};
use crate::map_layer::MapGeometry;
use crate::projection::{meters_per_pixel, MapProjection};

const PAN_SPEED_PX: f32 = 500.0;
/// Zoom levels per wheel notch.
const WHEEL_ZOOM_STEP: f64 = 0.5;
const LEFT_DRAG_THRESHOLD: f32 = 5.0;
/// Viewport assumed when there is no window (headless runs).
const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// 2D map view: world point at the window center and zoom scale.
///
/// World units are meters in [`MapProjection`] space; screen y grows down,
/// world y grows north.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Vec2,
    pub meters_per_pixel: f32,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            meters_per_pixel: meters_per_pixel(DEFAULT_ZOOM, DEFAULT_CENTER_LAT) as f32,
        }
    }
}

impl MapView {
    pub fn screen_to_world(&self, cursor: Vec2, viewport: Vec2) -> Vec2 {
        let offset = cursor - viewport / 2.0;
        self.center + Vec2::new(offset.x, -offset.y) * self.meters_per_pixel
    }

    /// Change scale while keeping the world point under `cursor` fixed.
    pub fn zoom_about(&mut self, cursor: Vec2, viewport: Vec2, new_mpp: f32) {
        let anchor = self.screen_to_world(cursor, viewport);
        let offset = cursor - viewport / 2.0;
        self.meters_per_pixel = new_mpp;
        self.center = anchor - Vec2::new(offset.x, -offset.y) * new_mpp;
    }

    /// Move the map with the pointer by a screen-space delta.
    pub fn pan_pixels(&mut self, delta: Vec2) {
        self.center -= Vec2::new(delta.x, -delta.y) * self.meters_per_pixel;
    }
}

/// Allowed scale range, from the zoom limits at the map's latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min_mpp: f32,
    pub max_mpp: f32,
}

impl ZoomLimits {
    pub fn at_latitude(lat: f64) -> Self {
        Self {
            min_mpp: meters_per_pixel(MAX_ZOOM, lat) as f32,
            max_mpp: meters_per_pixel(MIN_ZOOM, lat) as f32,
        }
    }

    pub fn clamp(&self, mpp: f32) -> f32 {
        mpp.clamp(self.min_mpp, self.max_mpp)
    }
}

/// Screen rectangle in logical pixels, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenArea {
    pub fn full(window: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: window,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// Part of the window the map is visible in, i.e. not covered by the top bar
/// or the side panel. Published by the UI every frame; `None` until then.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MapViewport(pub Option<ScreenArea>);

impl MapViewport {
    /// The free area, or the whole window when none is known.
    pub fn area_or_full(&self, window: Vec2) -> ScreenArea {
        self.0
            .filter(|area| area.size().x > 0.0 && area.size().y > 0.0)
            .unwrap_or(ScreenArea::full(window))
    }
}

/// View that shows `bounds` (world meters) inside `area` of a `window`-sized
/// screen with `padding` pixels on every side, zoomed in no further than
/// `min_mpp`. The camera stays at the window center, so it is shifted by the
/// area's offset from it.
pub fn fit_bounds(
    bounds: Rect<f64>,
    window: Vec2,
    area: ScreenArea,
    padding: f32,
    min_mpp: f32,
) -> MapView {
    let usable = (area.size() - Vec2::splat(2.0 * padding)).max(Vec2::ONE);
    let mpp = (bounds.width() as f32 / usable.x)
        .max(bounds.height() as f32 / usable.y)
        .max(min_mpp);
    centered_in_area(bounds, window, area, mpp)
}

/// View at scale `mpp` with the center of `bounds` at the center of `area`.
pub fn centered_in_area(bounds: Rect<f64>, window: Vec2, area: ScreenArea, mpp: f32) -> MapView {
    let offset = area.center() - window / 2.0;
    let center = bounds.center();
    MapView {
        center: Vec2::new(center.x as f32, center.y as f32) - Vec2::new(offset.x, -offset.y) * mpp,
        meters_per_pixel: mpp,
    }
}

/// Camera moves requested by loading, search, clicks and the zoom buttons.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    /// Show the whole dataset.
    FitAll,
    FitRegion {
        index: usize,
        padding: f32,
        max_zoom: Option<f64>,
    },
    /// Zoom around the window center by whole or fractional levels.
    ZoomBy(f64),
}

/// Tracks left-click drag state: differentiates click from drag.
/// When the mouse moves beyond `LEFT_DRAG_THRESHOLD` pixels from the initial
/// press it becomes a pan, and the release is not treated as a click.
#[derive(Resource, Default)]
pub struct LeftClickDrag {
    pub pressed: bool,
    pub start_pos: Vec2,
    pub last_pos: Vec2,
    /// True once the mouse has moved beyond the threshold.
    pub is_dragging: bool,
}

fn viewport_size(windows: &Query<&Window>) -> Vec2 {
    windows
        .get_single()
        .map(|w| w.size())
        .ok()
        .filter(|size| size.x > 0.0 && size.y > 0.0)
        .unwrap_or(FALLBACK_VIEWPORT)
}

pub fn setup_map_camera(mut commands: Commands, config: Res<MapConfig>) {
    let projection = MapProjection::new(config.center_lat, config.center_lon);
    let view = MapView {
        center: Vec2::ZERO,
        meters_per_pixel: meters_per_pixel(config.zoom, config.center_lat) as f32,
    };

    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: view.meters_per_pixel,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_translation(view.center.extend(0.0)),
    ));
    commands.insert_resource(projection);
    commands.insert_resource(view);
}

/// Turn dataset loads and search hits into view requests.
pub fn queue_view_requests(
    mut loaded: EventReader<DatasetLoaded>,
    mut hits: EventReader<SearchHit>,
    config: Res<MapConfig>,
    mut requests: EventWriter<ViewRequest>,
) {
    if loaded.read().last().is_some() {
        requests.send(ViewRequest::FitAll);
    }
    for hit in hits.read() {
        requests.send(ViewRequest::FitRegion {
            index: hit.index,
            padding: config.fit_padding_px,
            max_zoom: None,
        });
    }
}

/// Apply queued view requests. Later requests in the same frame win.
pub fn handle_view_requests(
    mut requests: EventReader<ViewRequest>,
    geometry: Res<MapGeometry>,
    config: Res<MapConfig>,
    map_viewport: Res<MapViewport>,
    windows: Query<&Window>,
    mut view: ResMut<MapView>,
) {
    let window = viewport_size(&windows);
    let area = map_viewport.area_or_full(window);
    let limits = ZoomLimits::at_latitude(config.center_lat);

    for request in requests.read() {
        match *request {
            ViewRequest::FitAll => {
                if let Some(bounds) = geometry.bounds() {
                    let fitted = fit_bounds(bounds, window, area, 0.0, limits.min_mpp);
                    let mpp = limits.clamp(fitted.meters_per_pixel);
                    *view = centered_in_area(bounds, window, area, mpp);
                }
            }
            ViewRequest::FitRegion {
                index,
                padding,
                max_zoom,
            } => {
                let Some(bounds) = geometry.region_bounds(index) else {
                    warn!("Cannot fit region {}: no geometry", index);
                    continue;
                };
                let min_mpp = max_zoom
                    .map(|zoom| meters_per_pixel(zoom, config.center_lat) as f32)
                    .unwrap_or(limits.min_mpp);
                let fitted = fit_bounds(bounds, window, area, padding, min_mpp);
                let mpp = limits.clamp(fitted.meters_per_pixel);
                *view = centered_in_area(bounds, window, area, mpp);
            }
            ViewRequest::ZoomBy(levels) => {
                let mpp = view.meters_per_pixel / 2f64.powf(levels) as f32;
                view.meters_per_pixel = limits.clamp(mpp);
            }
        }
    }
}

/// System: push [`MapView`] into the camera transform and projection.
pub fn apply_map_view(
    view: Res<MapView>,
    mut query: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    if !view.is_changed() {
        return;
    }
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    transform.translation.x = view.center.x;
    transform.translation.y = view.center.y;
    projection.scale = view.meters_per_pixel;
}

/// Arrow keys: pan at a constant screen speed.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    gate: Res<MapInputGate>,
    time: Res<Time>,
    mut view: ResMut<MapView>,
) {
    if !gate.keyboard_free() {
        return;
    }

    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        // Up reveals more of the north, like dragging the map down.
        let delta = -dir.normalize() * PAN_SPEED_PX * time.delta_secs();
        view.pan_pixels(delta);
    }
}

/// Left-mouse drag: pan (with threshold to distinguish from clicks).
pub fn camera_left_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut left_drag: ResMut<LeftClickDrag>,
    mut view: ResMut<MapView>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            left_drag.pressed = true;
            left_drag.start_pos = pos;
            left_drag.last_pos = pos;
            left_drag.is_dragging = false;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        left_drag.pressed = false;
        left_drag.is_dragging = false;
    }

    if left_drag.pressed {
        if let Some(pos) = window.cursor_position() {
            if !left_drag.is_dragging {
                let dist = (pos - left_drag.start_pos).length();
                if dist > LEFT_DRAG_THRESHOLD {
                    left_drag.is_dragging = true;
                }
            }

            if left_drag.is_dragging {
                let delta = pos - left_drag.last_pos;
                if delta != Vec2::ZERO {
                    view.pan_pixels(delta);
                }
                left_drag.last_pos = pos;
            }
        }
    }
}

/// Scroll wheel: zoom around the cursor.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    config: Res<MapConfig>,
    mut view: ResMut<MapView>,
) {
    let dy: f32 = scroll_evts
        .read()
        .map(|evt| match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        })
        .sum();
    if dy == 0.0 || egui_wants_pointer(&mut contexts) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let viewport = window.size();
    let cursor = window.cursor_position().unwrap_or(viewport / 2.0);

    let limits = ZoomLimits::at_latitude(config.center_lat);
    let levels = f64::from(dy) * WHEEL_ZOOM_STEP;
    let mpp = limits.clamp(view.meters_per_pixel / 2f64.powf(levels) as f32);
    if mpp != view.meters_per_pixel {
        view.zoom_about(cursor, viewport, mpp);
    }
}
