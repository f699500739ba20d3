//! The energy figures a region can be shaded by.

/// Which yearly energy figure the map is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Gas volume (m³ / yr).
    #[default]
    Gas,
    /// Electricity consumption (kWh / yr).
    Electricity,
    /// Solar PV production (kWh / yr).
    Pv,
}

/// Ordered list of metrics, used for the radio buttons and Tab cycling.
pub const ALL_METRICS: [Metric; 3] = [Metric::Gas, Metric::Electricity, Metric::Pv];

impl Metric {
    /// Returns the next metric in the cycle (wraps around).
    pub fn next(self) -> Self {
        let idx = ALL_METRICS.iter().position(|&m| m == self).unwrap_or(0);
        ALL_METRICS[(idx + 1) % ALL_METRICS.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gas => "Gas",
            Self::Electricity => "Electricity",
            Self::Pv => "PV Yield",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Gas => "m³",
            Self::Electricity | Self::Pv => "kWh",
        }
    }

    /// Heading shown above the legend.
    pub fn legend_title(self) -> &'static str {
        match self {
            Self::Gas => "GAS (m³)",
            Self::Electricity => "ELEC (kWh)",
            Self::Pv => "PV (kWh)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_metrics() {
        let mut metric = Metric::Gas;
        for expected in [Metric::Electricity, Metric::Pv, Metric::Gas] {
            metric = metric.next();
            assert_eq!(metric, expected);
        }
    }

    #[test]
    fn legend_titles_carry_units() {
        for metric in ALL_METRICS {
            assert!(
                metric.legend_title().contains(metric.unit()),
                "legend title for {:?} should mention {}",
                metric,
                metric.unit()
            );
        }
    }
}
