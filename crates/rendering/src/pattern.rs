//! Two-tone stripe fills for regions with a modified scenario.
//!
//! Each postal code owns one small texture: simulated color in the left
//! half, actual color in the right half. Region meshes sample it with a
//! repeating, nearest-neighbour sampler through UVs that are rotated 45° and
//! scaled to a fixed on-screen tile size, which gives diagonal stripes.

use std::collections::HashMap;

use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Side of one stripe tile in screen pixels.
pub const STRIPE_TILE_PX: f32 = 10.0;

/// Which colors a region's stripe texture shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripePattern {
    pub id: String,
    pub simulated: [u8; 3],
    pub actual: [u8; 3],
}

impl StripePattern {
    pub fn new(postcode: &str, simulated: [u8; 3], actual: [u8; 3]) -> Self {
        Self {
            id: pattern_id(postcode),
            simulated,
            actual,
        }
    }

    /// RGBA8 texels for a 2×1 texture: simulated, then actual.
    pub fn texels(&self) -> Vec<u8> {
        let [sr, sg, sb] = self.simulated;
        let [ar, ag, ab] = self.actual;
        vec![sr, sg, sb, 255, ar, ag, ab, 255]
    }

    pub fn to_image(&self) -> Image {
        let mut image = Image::new(
            Extent3d {
                width: 2,
                height: 1,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.texels(),
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        );
        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            address_mode_v: ImageAddressMode::Repeat,
            mag_filter: ImageFilterMode::Nearest,
            min_filter: ImageFilterMode::Nearest,
            ..default()
        });
        image
    }
}

/// `pattern-<postcode without whitespace>`.
pub fn pattern_id(postcode: &str) -> String {
    let compact: String = postcode.chars().filter(|c| !c.is_whitespace()).collect();
    format!("pattern-{compact}")
}

/// Stripe textures by pattern id. Created on first use, rewritten in place
/// afterwards.
#[derive(Resource, Default)]
pub struct PatternTextures {
    handles: HashMap<String, Handle<Image>>,
}

impl PatternTextures {
    pub fn upsert(&mut self, pattern: &StripePattern, images: &mut Assets<Image>) -> Handle<Image> {
        if let Some(handle) = self.handles.get(&pattern.id) {
            if let Some(image) = images.get_mut(handle) {
                let texels = pattern.texels();
                if image.data != texels {
                    image.data = texels;
                }
                return handle.clone();
            }
        }
        let handle = images.add(pattern.to_image());
        self.handles.insert(pattern.id.clone(), handle.clone());
        handle
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }
}

/// Pattern-space texture coordinate for a world position (meters) at the
/// given zoom scale.
pub fn stripe_uv(position: [f32; 3], meters_per_pixel: f32) -> [f32; 2] {
    let tile = STRIPE_TILE_PX * meters_per_pixel.max(f32::EPSILON);
    let (sin, cos) = std::f32::consts::FRAC_PI_4.sin_cos();
    let u = position[0] * cos + position[1] * sin;
    let v = -position[0] * sin + position[1] * cos;
    [u / tile, v / tile]
}

/// Recompute a region mesh's UVs for the current zoom scale.
pub fn refresh_stripe_uvs(mesh: &mut Mesh, meters_per_pixel: f32) {
    let uvs: Vec<[f32; 2]> = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) => positions
            .iter()
            .map(|&p| stripe_uv(p, meters_per_pixel))
            .collect(),
        _ => return,
    };
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_id_strips_whitespace() {
        assert_eq!(pattern_id("1811AA"), "pattern-1811AA");
        assert_eq!(pattern_id("1811 AB"), "pattern-1811AB");
    }

    #[test]
    fn simulated_color_fills_left_half() {
        let pattern = StripePattern::new("1811AA", [1, 2, 3], [4, 5, 6]);
        assert_eq!(pattern.texels(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn upsert_reuses_texture_per_postcode() {
        let mut images = Assets::<Image>::default();
        let mut textures = PatternTextures::default();

        let first = textures.upsert(&StripePattern::new("1811AA", [1, 1, 1], [2, 2, 2]), &mut images);
        let second = textures.upsert(&StripePattern::new("1811AA", [9, 9, 9], [2, 2, 2]), &mut images);
        assert_eq!(first, second, "same postcode keeps one texture");
        assert_eq!(textures.len(), 1);
        let image = images.get(&first).expect("texture exists");
        assert_eq!(&image.data[..4], &[9, 9, 9, 255], "texture updated in place");

        textures.upsert(&StripePattern::new("1811AB", [1, 1, 1], [2, 2, 2]), &mut images);
        assert_eq!(textures.len(), 2);
    }

    #[test]
    fn stripe_tile_tracks_zoom() {
        let near = stripe_uv([10.0, 0.0, 0.0], 1.0);
        let far = stripe_uv([10.0, 0.0, 0.0], 2.0);
        assert!((near[0] - 2.0 * far[0]).abs() < 1e-5);
    }
}
