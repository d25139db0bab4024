//! Domain layer: plastic grade reference data and impact calculation

pub mod catalog;
pub mod facts;
pub mod model;
pub mod service;

pub use catalog::{lookup, lookup_all, lookup_by_name, resolve};
pub use model::{
    GradeImpact, ImpactMetric, ImpactResult, ItemWeight, OceanThreat, PlasticGrade,
};
pub use service::{compute_impact, compute_impact_for, eco_tip, AnimationFrame, ImpactAnimation};
