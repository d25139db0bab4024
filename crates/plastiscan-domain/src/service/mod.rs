//! Domain services

pub mod impact_animation;
pub mod impact_calculator;

pub use impact_animation::{AnimationFrame, ImpactAnimation};
pub use impact_calculator::{compute_impact, compute_impact_for, eco_tip};
