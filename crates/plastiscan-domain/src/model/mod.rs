//! Domain model types

pub mod impact;
pub mod plastic_grade;

pub use impact::{ImpactMetric, ImpactResult, ItemWeight};
pub use plastic_grade::{GradeImpact, OceanThreat, PlasticGrade};
