//! Stepped color ramps for the choropleth.
//!
//! Each metric has seven bins. A value falls into the highest bin whose lower
//! bound it strictly exceeds; anything at or below the first bound (zero,
//! negatives, NaN) lands in bin 0. The same table drives region fills and the
//! legend so the two can never disagree.

use scenario::metric::Metric;

// ---------------------------------------------------------------------------
// Threshold ramps
// ---------------------------------------------------------------------------

/// One step of a ramp: values above `lower` get `rgb`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBin {
    pub lower: f64,
    pub rgb: [u8; 3],
}

/// Seven ascending bins.
pub struct ThresholdRamp {
    bins: &'static [ThresholdBin],
}

/// One legend line: swatch color plus `"lower–next"` or `"lower+"`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub rgb: [u8; 3],
    pub label: String,
}

impl ThresholdRamp {
    pub fn bins(&self) -> &'static [ThresholdBin] {
        self.bins
    }

    /// Index of the bin `value` falls into.
    pub fn bin_index(&self, value: f64) -> usize {
        self.bins
            .iter()
            .rposition(|bin| value > bin.lower)
            .unwrap_or(0)
    }

    pub fn rgb(&self, value: f64) -> [u8; 3] {
        self.bins[self.bin_index(value)].rgb
    }

    /// Legend rows, lowest bin first.
    pub fn legend_rows(&self) -> Vec<LegendRow> {
        self.bins
            .iter()
            .enumerate()
            .map(|(i, bin)| {
                let label = match self.bins.get(i + 1) {
                    Some(next) => format!("{}\u{2013}{}", bin.lower, next.lower),
                    None => format!("{}+", bin.lower),
                };
                LegendRow {
                    rgb: bin.rgb,
                    label,
                }
            })
            .collect()
    }
}

const fn bin(lower: f64, rgb: [u8; 3]) -> ThresholdBin {
    ThresholdBin { lower, rgb }
}

/// Gas in m³, yellow to dark red.
pub static GAS_RAMP: ThresholdRamp = ThresholdRamp {
    bins: &[
        bin(0.0, [0xfe, 0xd9, 0x76]),
        bin(400.0, [0xfe, 0xb2, 0x4c]),
        bin(600.0, [0xfd, 0x8d, 0x3c]),
        bin(800.0, [0xfc, 0x4e, 0x2a]),
        bin(1000.0, [0xe3, 0x1a, 0x1c]),
        bin(1200.0, [0xbd, 0x00, 0x26]),
        bin(1500.0, [0x80, 0x00, 0x26]),
    ],
};

/// Electricity in kWh, light to dark blue.
pub static ELECTRICITY_RAMP: ThresholdRamp = ThresholdRamp {
    bins: &[
        bin(0.0, [0xde, 0xeb, 0xf7]),
        bin(1500.0, [0xc6, 0xdb, 0xef]),
        bin(2000.0, [0x9e, 0xca, 0xe1]),
        bin(2500.0, [0x6b, 0xae, 0xd6]),
        bin(3000.0, [0x42, 0x92, 0xc6]),
        bin(3500.0, [0x21, 0x71, 0xb5]),
        bin(4000.0, [0x08, 0x45, 0x94]),
    ],
};

/// PV production in kWh, light to dark green.
pub static PV_RAMP: ThresholdRamp = ThresholdRamp {
    bins: &[
        bin(0.0, [0xed, 0xf8, 0xe9]),
        bin(500.0, [0xc7, 0xe9, 0xc0]),
        bin(1000.0, [0xa1, 0xd9, 0x9b]),
        bin(1500.0, [0x74, 0xc4, 0x76]),
        bin(2000.0, [0x41, 0xab, 0x5d]),
        bin(3000.0, [0x23, 0x8b, 0x45]),
        bin(4000.0, [0x00, 0x5a, 0x32]),
    ],
};

pub fn ramp_for(metric: Metric) -> &'static ThresholdRamp {
    match metric {
        Metric::Gas => &GAS_RAMP,
        Metric::Electricity => &ELECTRICITY_RAMP,
        Metric::Pv => &PV_RAMP,
    }
}
