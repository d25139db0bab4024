//! Impact calculation for a detected grade

use crate::model::{ImpactResult, ItemWeight, PlasticGrade};

/// Compute the impact of one item.
///
/// Formula: figure = per_kg_figure × weight, except the recycling rate which
/// is a population statistic and does not scale. Out-of-range weights are
/// clamped to [0.1, 2.0] kg.
pub fn compute_impact(grade: &PlasticGrade, weight_kg: f64) -> ImpactResult {
    compute_impact_for(grade, ItemWeight::clamped(weight_kg))
}

pub fn compute_impact_for(grade: &PlasticGrade, weight: ItemWeight) -> ImpactResult {
    let w = weight.kg();
    ImpactResult {
        carbon: grade.impact.carbon_footprint * w,
        water: grade.impact.water_usage * w,
        energy: grade.impact.energy_production * w,
        recycling_rate: grade.impact.recycling_rate,
    }
}

/// Disposal advice shown under the impact figures
pub fn eco_tip(grade: &PlasticGrade) -> &'static str {
    if grade.recyclable {
        "This plastic can be recycled! Clean it thoroughly and check your local recycling guidelines."
    } else {
        "This plastic is difficult to recycle. Consider reusing it or finding alternatives for future purchases."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{lookup, lookup_all};
    use proptest::prelude::*;

    #[test]
    fn test_pet_half_kilo() {
        // 0.5kg of PET: 2.3 × 0.5 = 1.15 kg CO2
        let impact = compute_impact(lookup(1).unwrap(), 0.5);
        assert!((impact.carbon - 1.15).abs() < 1e-9);
        assert!((impact.water - 8.75).abs() < 1e-9);
        assert!((impact.energy - 42.0).abs() < 1e-9);
        assert_eq!(impact.recycling_rate, 58.0);
    }

    #[test]
    fn test_pvc_two_kilos() {
        let impact = compute_impact(lookup(3).unwrap(), 2.0);
        assert!((impact.carbon - 6.4).abs() < 1e-9);
        assert!((impact.water - 45.6).abs() < 1e-9);
        assert!((impact.energy - 190.0).abs() < 1e-9);
        assert_eq!(impact.recycling_rate, 1.0);
    }

    #[test]
    fn test_out_of_range_weight_is_clamped() {
        let pp = lookup(5).unwrap();
        assert_eq!(compute_impact(pp, 10.0), compute_impact(pp, 2.0));
        assert_eq!(compute_impact(pp, 0.0), compute_impact(pp, 0.1));
        assert_eq!(compute_impact(pp, f64::NAN), compute_impact(pp, 0.5));
    }

    #[test]
    fn test_eco_tip_follows_recyclability() {
        assert!(eco_tip(lookup(1).unwrap()).starts_with("This plastic can be recycled"));
        assert!(eco_tip(lookup(3).unwrap()).contains("difficult to recycle"));
    }

    proptest! {
        #[test]
        fn prop_figures_scale_linearly(index in 0usize..5, weight in 0.1f64..=2.0) {
            let grade = &lookup_all()[index];
            let impact = compute_impact(grade, weight);
            prop_assert_eq!(impact.carbon, grade.impact.carbon_footprint * weight);
            prop_assert_eq!(impact.water, grade.impact.water_usage * weight);
            prop_assert_eq!(impact.energy, grade.impact.energy_production * weight);
        }

        #[test]
        fn prop_recycling_rate_ignores_weight(index in 0usize..5, weight in proptest::num::f64::ANY) {
            let grade = &lookup_all()[index];
            prop_assert_eq!(compute_impact(grade, weight).recycling_rate, grade.impact.recycling_rate);
        }
    }
}
