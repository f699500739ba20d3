//! # Choropleth layer
//!
//! One `Mesh2d` per region, triangulated once when the dataset arrives.
//! Fills live in a per-region `ColorMaterial` (solid color, or the region's
//! stripe texture once its scenario is modified). Borders are gizmo line
//! strips redrawn every frame, bucketed by stroke weight.
//!
//! Re-styling is a full pass over every region, run whenever the metric, the
//! scenario store, the hover target or the search highlight changes. Only
//! materials whose style actually changed are touched.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use geo::{BoundingRect, Contains, Coord, MultiPolygon, Point, Rect, TriangulateEarcut};

use scenario::loading::DatasetLoaded;
use scenario::region::{merge_rects, RegionSet};
use scenario::store::ScenarioStore;

use crate::camera::MapView;
use crate::overlay::OverlayState;
use crate::pattern::{refresh_stripe_uvs, stripe_uv, PatternTextures};
use crate::picking::{HighlightState, HoverState};
use crate::projection::MapProjection;
use crate::style::{
    region_style, Emphasis, Fill, RegionStyle, MODIFIED_BORDER_WEIGHT, UNMODIFIED_BORDER_WEIGHT,
};

const SEARCH_HIGHLIGHT_WEIGHT: f32 = 3.0;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A region outline in world meters.
#[derive(Debug, Clone)]
pub struct ProjectedRegion {
    pub shape: MultiPolygon<f64>,
    pub bounds: Option<Rect<f64>>,
}

/// Projected outlines, indexed like [`RegionSet`].
#[derive(Resource, Debug, Default)]
pub struct MapGeometry {
    regions: Vec<ProjectedRegion>,
    bounds: Option<Rect<f64>>,
}

impl MapGeometry {
    pub fn from_regions(regions: &RegionSet, projection: &MapProjection) -> Self {
        let regions: Vec<ProjectedRegion> = regions
            .iter()
            .map(|region| {
                let shape = projection.project_multipolygon(&region.geometry);
                let bounds = shape.bounding_rect();
                ProjectedRegion { shape, bounds }
            })
            .collect();
        let bounds = regions
            .iter()
            .filter_map(|region| region.bounds)
            .reduce(merge_rects);
        Self { regions, bounds }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    pub fn region_bounds(&self, index: usize) -> Option<Rect<f64>> {
        self.regions.get(index).and_then(|region| region.bounds)
    }

    /// Region under a world point. Later regions draw on top, so they win.
    pub fn region_at(&self, point: Coord<f64>) -> Option<usize> {
        let target = Point::from(point);
        self.regions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, region)| {
                region.bounds.is_some_and(|b| rect_contains(&b, point))
                    && region.shape.contains(&target)
            })
            .map(|(index, _)| index)
    }
}

fn rect_contains(rect: &Rect<f64>, point: Coord<f64>) -> bool {
    point.x >= rect.min().x
        && point.x <= rect.max().x
        && point.y >= rect.min().y
        && point.y <= rect.max().y
}

/// Triangulated fill mesh for one region, with stripe UVs for the given
/// zoom scale. `None` when the outline has no area.
pub fn region_mesh(shape: &MultiPolygon<f64>, meters_per_pixel: f32) -> Option<Mesh> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for polygon in &shape.0 {
        let raw = polygon.earcut_triangles_raw();
        let base = positions.len() as u32;
        positions.extend(
            raw.vertices
                .chunks_exact(2)
                .map(|xy| [xy[0] as f32, xy[1] as f32, 0.0]),
        );
        indices.extend(raw.triangle_indices.iter().map(|&i| base + i as u32));
    }

    if indices.is_empty() {
        return None;
    }

    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|&p| stripe_uv(p, meters_per_pixel))
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    Some(mesh)
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Marker on a region's fill entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionShape {
    pub index: usize,
}

/// Styles currently shown, indexed like [`RegionSet`]. Empty until the first
/// re-style after a load.
#[derive(Resource, Debug, Default)]
pub struct RegionStyles(pub Vec<RegionStyle>);

/// Replace all region entities when a dataset finishes loading.
#[allow(clippy::too_many_arguments)]
pub fn build_region_layer(
    mut commands: Commands,
    mut loaded: EventReader<DatasetLoaded>,
    regions: Res<RegionSet>,
    projection: Res<MapProjection>,
    view: Res<MapView>,
    existing: Query<Entity, With<RegionShape>>,
    mut geometry: ResMut<MapGeometry>,
    mut styles: ResMut<RegionStyles>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if loaded.read().last().is_none() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }
    *geometry = MapGeometry::from_regions(&regions, &projection);
    styles.0.clear();

    let mut spawned = 0usize;
    for (index, region) in geometry.regions.iter().enumerate() {
        let Some(mesh) = region_mesh(&region.shape, view.meters_per_pixel) else {
            continue;
        };
        commands.spawn((
            Mesh2d(meshes.add(mesh)),
            MeshMaterial2d(materials.add(ColorMaterial::default())),
            Transform::default(),
            RegionShape { index },
        ));
        spawned += 1;
    }

    if spawned < geometry.len() {
        warn!(
            "{} regions have no drawable area",
            geometry.len() - spawned
        );
    }
    info!("Map layer built: {} region meshes", spawned);
}

/// Full re-style pass.
///
/// Hover wins over the search highlight, which wins over the base style.
#[allow(clippy::too_many_arguments)]
pub fn restyle_regions(
    overlay: Res<OverlayState>,
    store: Res<ScenarioStore>,
    hover: Res<HoverState>,
    highlight: Res<HighlightState>,
    geometry: Res<MapGeometry>,
    regions: Res<RegionSet>,
    view: Res<MapView>,
    shapes: Query<(&RegionShape, &MeshMaterial2d<ColorMaterial>, &Mesh2d)>,
    mut styles: ResMut<RegionStyles>,
    mut patterns: ResMut<PatternTextures>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
) {
    let dirty = overlay.is_changed()
        || store.is_changed()
        || hover.is_changed()
        || highlight.is_changed()
        || geometry.is_changed();
    if !dirty {
        return;
    }

    let next: Vec<RegionStyle> = regions
        .iter()
        .enumerate()
        .map(|(index, region)| {
            let base = region_style(region, store.get(&region.postcode), overlay.metric);
            if hover.0 == Some(index) {
                base.with_emphasis(Emphasis::Hover)
            } else if highlight.0 == Some(index) {
                base.with_emphasis(Emphasis::SearchHighlight)
            } else {
                base
            }
        })
        .collect();

    for (shape, material, mesh) in &shapes {
        let Some(style) = next.get(shape.index) else {
            continue;
        };
        let previous = styles.0.get(shape.index);
        if previous == Some(style) {
            continue;
        }
        let Some(target) = materials.get_mut(&material.0) else {
            continue;
        };
        match &style.fill {
            Fill::Solid([r, g, b]) => {
                target.color = Color::srgba_u8(*r, *g, *b, 255).with_alpha(style.fill_opacity);
                target.texture = None;
            }
            Fill::Pattern(pattern) => {
                target.color = Color::WHITE.with_alpha(style.fill_opacity);
                target.texture = Some(patterns.upsert(pattern, &mut images));
                let was_patterned = previous.is_some_and(RegionStyle::is_patterned);
                if !was_patterned {
                    if let Some(mesh) = meshes.get_mut(&mesh.0) {
                        refresh_stripe_uvs(mesh, view.meters_per_pixel);
                    }
                }
            }
        }
    }

    styles.0 = next;
}

/// Keep stripe tiles a constant on-screen size while zooming.
pub fn refresh_pattern_uvs(
    view: Res<MapView>,
    styles: Res<RegionStyles>,
    shapes: Query<(&RegionShape, &Mesh2d)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut last_scale: Local<f32>,
) {
    if *last_scale == view.meters_per_pixel {
        return;
    }
    *last_scale = view.meters_per_pixel;

    for (shape, mesh) in &shapes {
        let patterned = styles
            .0
            .get(shape.index)
            .is_some_and(RegionStyle::is_patterned);
        if !patterned {
            continue;
        }
        if let Some(mesh) = meshes.get_mut(&mesh.0) {
            refresh_stripe_uvs(mesh, view.meters_per_pixel);
        }
    }
}

// ---------------------------------------------------------------------------
// Borders
// ---------------------------------------------------------------------------

/// Thin white outlines of untouched regions.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ThinBorderGizmos;

/// Modified and hovered regions.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct BoldBorderGizmos;

/// Search highlight.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct HeavyBorderGizmos;

pub fn configure_border_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<ThinBorderGizmos>();
    config.line_width = UNMODIFIED_BORDER_WEIGHT;
    let (config, _) = config_store.config_mut::<BoldBorderGizmos>();
    config.line_width = MODIFIED_BORDER_WEIGHT;
    let (config, _) = config_store.config_mut::<HeavyBorderGizmos>();
    config.line_width = SEARCH_HIGHLIGHT_WEIGHT;
}

pub fn draw_region_borders(
    geometry: Res<MapGeometry>,
    styles: Res<RegionStyles>,
    mut thin: Gizmos<ThinBorderGizmos>,
    mut bold: Gizmos<BoldBorderGizmos>,
    mut heavy: Gizmos<HeavyBorderGizmos>,
) {
    for (region, style) in geometry.regions.iter().zip(styles.0.iter()) {
        let [r, g, b] = style.border_rgb;
        let color = Color::srgba_u8(r, g, b, 255).with_alpha(style.border_opacity);
        let rings = region
            .shape
            .0
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()));

        for ring in rings {
            let points = ring.coords().map(|c| Vec2::new(c.x as f32, c.y as f32));
            if style.border_weight >= SEARCH_HIGHLIGHT_WEIGHT {
                heavy.linestrip_2d(points, color);
            } else if style.border_weight >= MODIFIED_BORDER_WEIGHT {
                bold.linestrip_2d(points, color);
            } else {
                thin.linestrip_2d(points, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, polygon};
    use scenario::adjustment::{apply_scenario_adjustments, Lever, ScenarioAdjusted};
    use scenario::region::RegionRecord;

    fn square(lon: f64, lat: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: lon, y: lat),
            (x: lon + size, y: lat),
            (x: lon + size, y: lat + size),
            (x: lon, y: lat + size),
            (x: lon, y: lat),
        ]])
    }

    fn geometry() -> MapGeometry {
        let set = RegionSet::new(vec![
            RegionRecord::with_values("1811AA", 1.0, 1.0, 1.0).with_geometry(square(4.75, 52.63, 0.001)),
            RegionRecord::with_values("1811AB", 1.0, 1.0, 1.0).with_geometry(square(4.752, 52.63, 0.001)),
            RegionRecord::with_values("1811AC", 1.0, 1.0, 1.0),
        ]);
        MapGeometry::from_regions(&set, &MapProjection::new(52.63, 4.75))
    }

    #[test]
    fn picks_region_under_point() {
        let geometry = geometry();
        let projection = MapProjection::new(52.63, 4.75);
        let inside_first = projection.project(4.7505, 52.6305);
        let inside_second = projection.project(4.7525, 52.6305);
        let gap = projection.project(4.7515, 52.6305);

        assert_eq!(geometry.region_at(inside_first), Some(0));
        assert_eq!(geometry.region_at(inside_second), Some(1));
        assert_eq!(geometry.region_at(gap), None);
    }

    #[test]
    fn bounds_cover_regions_with_geometry() {
        let geometry = geometry();
        assert_eq!(geometry.len(), 3);
        assert!(geometry.region_bounds(2).is_none(), "no outline, no bounds");
        let all = geometry.bounds().expect("two regions have outlines");
        let first = geometry.region_bounds(0).expect("outline");
        let second = geometry.region_bounds(1).expect("outline");
        assert_eq!(all.min(), first.min());
        assert_eq!(all.max(), second.max());
    }

    #[test]
    fn square_triangulates_into_two_triangles() {
        let mesh = region_mesh(&square(0.0, 0.0, 10.0), 1.0).expect("mesh");
        assert_eq!(mesh.indices().map(|i| i.len()), Some(6));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
    }

    #[test]
    fn empty_outline_has_no_mesh() {
        assert!(region_mesh(&MultiPolygon::new(Vec::new()), 1.0).is_none());
    }

    #[test]
    fn region_at_on_empty_map() {
        assert_eq!(MapGeometry::default().region_at(coord! { x: 0.0, y: 0.0 }), None);
    }

    #[test]
    fn border_groups_get_their_stroke_widths() {
        let mut store = GizmoConfigStore::default();
        store.insert(GizmoConfig::default(), ThinBorderGizmos::default());
        store.insert(GizmoConfig::default(), BoldBorderGizmos::default());
        store.insert(GizmoConfig::default(), HeavyBorderGizmos::default());

        let mut app = App::new();
        app.insert_resource(store)
            .add_systems(Update, configure_border_gizmos);
        app.update();

        let store = app.world().resource::<GizmoConfigStore>();
        assert_eq!(store.config::<ThinBorderGizmos>().0.line_width, 0.8);
        assert_eq!(store.config::<BoldBorderGizmos>().0.line_width, 2.0);
        assert_eq!(store.config::<HeavyBorderGizmos>().0.line_width, 3.0);
    }

    // -----------------------------------------------------------------------
    // Re-styling
    // -----------------------------------------------------------------------

    fn restyle_app() -> App {
        let regions = RegionSet::new(vec![
            RegionRecord::with_values("1811AA", 1000.0, 2800.0, 300.0)
                .with_geometry(square(4.75, 52.63, 0.001)),
            RegionRecord::with_values("1811AB", 450.0, 1600.0, 0.0)
                .with_geometry(square(4.752, 52.63, 0.001)),
        ]);
        let geometry = MapGeometry::from_regions(&regions, &MapProjection::new(52.63, 4.75));

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<OverlayState>()
            .init_resource::<ScenarioStore>()
            .init_resource::<HoverState>()
            .init_resource::<HighlightState>()
            .init_resource::<MapView>()
            .init_resource::<RegionStyles>()
            .init_resource::<PatternTextures>()
            .add_event::<ScenarioAdjusted>()
            .add_systems(Update, (apply_scenario_adjustments, restyle_regions).chain());

        for (index, region) in geometry.regions.iter().enumerate() {
            let mesh = region_mesh(&region.shape, 1.0).expect("square has area");
            let mesh = app.world_mut().resource_mut::<Assets<Mesh>>().add(mesh);
            let material = app
                .world_mut()
                .resource_mut::<Assets<ColorMaterial>>()
                .add(ColorMaterial::default());
            app.world_mut()
                .spawn((Mesh2d(mesh), MeshMaterial2d(material), RegionShape { index }));
        }
        app.insert_resource(regions).insert_resource(geometry);
        app.update();
        app
    }

    fn material_of(app: &mut App, index: usize) -> ColorMaterial {
        let mut query = app
            .world_mut()
            .query::<(&RegionShape, &MeshMaterial2d<ColorMaterial>)>();
        let handle = query
            .iter(app.world())
            .find(|(shape, _)| shape.index == index)
            .map(|(_, material)| material.0.clone())
            .expect("region entity");
        app.world()
            .resource::<Assets<ColorMaterial>>()
            .get(&handle)
            .cloned()
            .expect("material")
    }

    #[test]
    fn untouched_regions_get_solid_translucent_fill() {
        let mut app = restyle_app();
        let material = material_of(&mut app, 0);
        assert!(material.texture.is_none());
        assert!((material.color.alpha() - 0.55).abs() < 1e-6);
        assert_eq!(app.world().resource::<RegionStyles>().0.len(), 2);
    }

    #[test]
    fn slider_move_puts_stripes_on_that_region_only() {
        let mut app = restyle_app();

        // Mark region 1's material so a rewrite would be visible.
        let mut query = app
            .world_mut()
            .query::<(&RegionShape, &MeshMaterial2d<ColorMaterial>)>();
        let other = query
            .iter(app.world())
            .find(|(shape, _)| shape.index == 1)
            .map(|(_, material)| material.0.clone())
            .expect("region entity");
        app.world_mut()
            .resource_mut::<Assets<ColorMaterial>>()
            .get_mut(&other)
            .expect("material")
            .color = Color::BLACK;

        app.world_mut().send_event(ScenarioAdjusted {
            postcode: "1811AA".to_string(),
            lever: Lever::GasDemand,
            percent: 50,
        });
        app.update();

        let styled = material_of(&mut app, 0);
        assert!(styled.texture.is_some(), "modified region shows the stripe texture");
        assert_eq!(styled.color.alpha(), 1.0);
        assert!(app.world().resource::<RegionStyles>().0[0].is_patterned());
        assert_eq!(app.world().resource::<PatternTextures>().len(), 1);

        let untouched = material_of(&mut app, 1);
        assert_eq!(untouched.color, Color::BLACK, "unchanged style was not rewritten");
        assert!(untouched.texture.is_none());
    }
}
