//! Plastic grade type definitions

use serde::Serialize;

/// Qualitative marine pollution risk, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OceanThreat {
    Low,
    Medium,
    High,
    Critical,
}

impl OceanThreat {
    pub fn label(&self) -> &'static str {
        match self {
            OceanThreat::Low => "Low",
            OceanThreat::Medium => "Medium",
            OceanThreat::High => "High",
            OceanThreat::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for OceanThreat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-kilogram environmental figures for a grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeImpact {
    /// kg CO2 per kg of plastic
    pub carbon_footprint: f64,
    pub decomposition_years: u32,
    /// Liters per kg
    pub water_usage: f64,
    /// MJ per kg
    pub energy_production: f64,
    pub ocean_threat: OceanThreat,
    /// Share of this grade currently recycled (0-100)
    pub recycling_rate: f64,
}

/// Resin identification code entry
#[derive(Debug, PartialEq, Serialize)]
pub struct PlasticGrade {
    /// Resin code, 1-5
    pub grade: u8,
    pub name: &'static str,
    pub full_name: &'static str,
    pub recyclable: bool,
    pub description: &'static str,
    pub examples: &'static [&'static str],
    /// RGB card colour
    pub accent: [u8; 3],
    pub impact: GradeImpact,
}

impl std::fmt::Display for PlasticGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.grade, self.name, self.full_name)
    }
}
