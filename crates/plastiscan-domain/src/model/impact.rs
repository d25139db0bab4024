//! Impact figures derived from a grade and an item weight

use serde::Serialize;

/// Item weight in kilograms, always within [`ItemWeight::MIN`, `ItemWeight::MAX`]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ItemWeight(f64);

impl ItemWeight {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 2.0;
    pub const DEFAULT: f64 = 0.5;
    /// Slider increment
    pub const STEP: f64 = 0.1;

    /// Clamp into range. NaN falls back to the default weight.
    pub fn clamped(kg: f64) -> Self {
        if kg.is_nan() {
            return Self(Self::DEFAULT);
        }
        Self(kg.clamp(Self::MIN, Self::MAX))
    }

    pub fn kg(&self) -> f64 {
        self.0
    }

    pub fn grams(&self) -> f64 {
        self.0 * 1000.0
    }
}

impl Default for ItemWeight {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for ItemWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kg", self.0)
    }
}

/// Environmental impact of one item
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ImpactResult {
    /// kg CO2
    pub carbon: f64,
    /// Liters
    pub water: f64,
    /// MJ
    pub energy: f64,
    /// Percent, independent of weight
    pub recycling_rate: f64,
}

impl ImpactResult {
    /// Component-wise multiplication by `ratio`
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            carbon: self.carbon * ratio,
            water: self.water * ratio,
            energy: self.energy * ratio,
            recycling_rate: self.recycling_rate * ratio,
        }
    }

    /// True when every component is within `tolerance` of `other`
    pub fn approx_eq(&self, other: &ImpactResult, tolerance: f64) -> bool {
        (self.carbon - other.carbon).abs() <= tolerance
            && (self.water - other.water).abs() <= tolerance
            && (self.energy - other.energy).abs() <= tolerance
            && (self.recycling_rate - other.recycling_rate).abs() <= tolerance
    }

    /// The four display tiles, in display order
    pub fn metrics(&self) -> [ImpactMetric; 4] {
        [
            ImpactMetric {
                label: "Carbon Footprint",
                value: format!("{:.2}", self.carbon),
                unit: "kg CO₂",
                description: "Greenhouse gases produced",
            },
            ImpactMetric {
                label: "Water Usage",
                value: format!("{:.1}", self.water),
                unit: "liters",
                description: "Water needed for production",
            },
            ImpactMetric {
                label: "Energy Required",
                value: format!("{:.1}", self.energy),
                unit: "MJ",
                description: "Energy for manufacturing",
            },
            ImpactMetric {
                label: "Recycling Rate",
                value: format!("{:.0}", self.recycling_rate),
                unit: "%",
                description: "Currently being recycled",
            },
        ]
    }
}

/// One formatted impact figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactMetric {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub description: &'static str,
}
