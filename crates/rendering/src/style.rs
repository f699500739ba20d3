//! Region styling: which fill and border each region gets for the current
//! metric and scenario.

use scenario::calculator::{actual_value, simulated_value};
use scenario::metric::Metric;
use scenario::region::RegionRecord;
use scenario::store::ScenarioEntry;

use crate::color_ramps::ramp_for;
use crate::pattern::StripePattern;

pub const UNMODIFIED_FILL_OPACITY: f32 = 0.55;
pub const UNMODIFIED_BORDER_WEIGHT: f32 = 0.8;
pub const UNMODIFIED_BORDER_OPACITY: f32 = 0.4;
pub const MODIFIED_BORDER_WEIGHT: f32 = 2.0;

const WHITE: [u8; 3] = [0xff, 0xff, 0xff];
const HOVER_BORDER: [u8; 3] = [0x2f, 0x36, 0x40];
const HIGHLIGHT_BORDER: [u8; 3] = [0x1e, 0x27, 0x2e];

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid([u8; 3]),
    Pattern(StripePattern),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionStyle {
    pub fill: Fill,
    pub fill_opacity: f32,
    pub border_rgb: [u8; 3],
    pub border_weight: f32,
    pub border_opacity: f32,
}

/// Temporary overrides on top of the base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Hover,
    SearchHighlight,
}

impl RegionStyle {
    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        let (border, weight, fill_opacity) = match emphasis {
            Emphasis::Hover => (HOVER_BORDER, 2.0, 0.7),
            Emphasis::SearchHighlight => (HIGHLIGHT_BORDER, 3.0, 0.8),
        };
        self.border_rgb = border;
        self.border_weight = weight;
        self.fill_opacity = fill_opacity;
        self
    }

    pub fn is_patterned(&self) -> bool {
        matches!(self.fill, Fill::Pattern(_))
    }
}

/// Base style for `region` under `entry` (None = never touched).
///
/// Unmodified regions are a translucent solid in the actual color. Modified
/// regions get the stripe pattern and a border in the simulated color.
pub fn region_style(region: &RegionRecord, entry: Option<&ScenarioEntry>, metric: Metric) -> RegionStyle {
    let ramp = ramp_for(metric);
    let actual = ramp.rgb(actual_value(region, metric));

    match entry {
        Some(entry) if entry.modified => {
            let simulated = ramp.rgb(simulated_value(region, Some(entry), metric));
            RegionStyle {
                fill: Fill::Pattern(StripePattern::new(&region.postcode, simulated, actual)),
                fill_opacity: 1.0,
                border_rgb: simulated,
                border_weight: MODIFIED_BORDER_WEIGHT,
                border_opacity: 1.0,
            }
        }
        _ => RegionStyle {
            fill: Fill::Solid(actual),
            fill_opacity: UNMODIFIED_FILL_OPACITY,
            border_rgb: WHITE,
            border_weight: UNMODIFIED_BORDER_WEIGHT,
            border_opacity: UNMODIFIED_BORDER_OPACITY,
        },
    }
}
