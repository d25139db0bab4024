//! Plastic grade catalog
//!
//! The five resin codes handled by the scanner. The table is compiled in and
//! never changes at runtime.

use crate::model::{GradeImpact, OceanThreat, PlasticGrade};
use plastiscan_types::{Error, Result};

static PLASTIC_GRADES: [PlasticGrade; 5] = [
    PlasticGrade {
        grade: 1,
        name: "PET",
        full_name: "Polyethylene Terephthalate",
        recyclable: true,
        description: "Commonly used for beverage bottles and food containers",
        examples: &["Water bottles", "Soda bottles", "Food jars"],
        accent: [5, 150, 105],
        impact: GradeImpact {
            carbon_footprint: 2.3,
            decomposition_years: 450,
            water_usage: 17.5,
            energy_production: 84.0,
            ocean_threat: OceanThreat::Medium,
            recycling_rate: 58.0,
        },
    },
    PlasticGrade {
        grade: 2,
        name: "HDPE",
        full_name: "High-Density Polyethylene",
        recyclable: true,
        description: "Used for milk jugs, detergent bottles, and shopping bags",
        examples: &["Milk jugs", "Shampoo bottles", "Shopping bags"],
        accent: [8, 145, 178],
        impact: GradeImpact {
            carbon_footprint: 1.8,
            decomposition_years: 400,
            water_usage: 15.2,
            energy_production: 76.0,
            ocean_threat: OceanThreat::Medium,
            recycling_rate: 31.0,
        },
    },
    PlasticGrade {
        grade: 3,
        name: "PVC",
        full_name: "Polyvinyl Chloride",
        recyclable: false,
        description: "Used for pipes, vinyl siding, and some packaging",
        examples: &["Pipes", "Credit cards", "Medical tubing"],
        accent: [249, 115, 22],
        impact: GradeImpact {
            carbon_footprint: 3.2,
            decomposition_years: 1000,
            water_usage: 22.8,
            energy_production: 95.0,
            ocean_threat: OceanThreat::Critical,
            recycling_rate: 1.0,
        },
    },
    PlasticGrade {
        grade: 4,
        name: "LDPE",
        full_name: "Low-Density Polyethylene",
        recyclable: false,
        description: "Used for plastic bags, squeeze bottles, and flexible lids",
        examples: &["Plastic bags", "Squeeze bottles", "Bread bags"],
        accent: [236, 72, 153],
        impact: GradeImpact {
            carbon_footprint: 1.9,
            decomposition_years: 500,
            water_usage: 16.1,
            energy_production: 78.0,
            ocean_threat: OceanThreat::High,
            recycling_rate: 5.0,
        },
    },
    PlasticGrade {
        grade: 5,
        name: "PP",
        full_name: "Polypropylene",
        recyclable: true,
        description: "Used for yogurt containers, bottle caps, and straws",
        examples: &["Yogurt cups", "Bottle caps", "Straws"],
        accent: [225, 29, 72],
        impact: GradeImpact {
            carbon_footprint: 1.7,
            decomposition_years: 400,
            water_usage: 14.8,
            energy_production: 73.0,
            ocean_threat: OceanThreat::Medium,
            recycling_rate: 3.0,
        },
    },
];

/// All grades, ordered by resin code
pub fn lookup_all() -> &'static [PlasticGrade] {
    &PLASTIC_GRADES
}

/// Get a grade by resin code
pub fn lookup(grade: u8) -> Option<&'static PlasticGrade> {
    PLASTIC_GRADES.iter().find(|g| g.grade == grade)
}

/// Get a grade by short name (case-insensitive)
pub fn lookup_by_name(name: &str) -> Option<&'static PlasticGrade> {
    PLASTIC_GRADES
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
}

/// Resolve user input that is either a resin code ("3") or a name ("pvc")
pub fn resolve(query: &str) -> Result<&'static PlasticGrade> {
    let query = query.trim();
    let found = match query.parse::<u8>() {
        Ok(code) => lookup(code),
        Err(_) => lookup_by_name(query),
    };
    found.ok_or_else(|| Error::UnknownGrade(query.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ordered_by_grade() {
        let codes: Vec<u8> = lookup_all().iter().map(|g| g.grade).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_lookup_all_is_stable() {
        let first = lookup_all();
        let second = lookup_all();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_impact_values_in_range() {
        for grade in lookup_all() {
            assert!(grade.impact.carbon_footprint > 0.0, "{}", grade.name);
            assert!(grade.impact.water_usage > 0.0, "{}", grade.name);
            assert!(grade.impact.energy_production > 0.0, "{}", grade.name);
            assert!(grade.impact.decomposition_years > 0, "{}", grade.name);
            assert!((0.0..=100.0).contains(&grade.impact.recycling_rate), "{}", grade.name);
            assert!(!grade.examples.is_empty(), "{}", grade.name);
        }
    }

    #[test]
    fn test_pet_reference_values() {
        let pet = lookup(1).unwrap();
        assert_eq!(pet.name, "PET");
        assert!(pet.recyclable);
        assert_eq!(pet.impact.carbon_footprint, 2.3);
        assert_eq!(pet.impact.water_usage, 17.5);
        assert_eq!(pet.impact.energy_production, 84.0);
        assert_eq!(pet.impact.recycling_rate, 58.0);
    }

    #[test]
    fn test_lookup_missing() {
        assert!(lookup(0).is_none());
        assert!(lookup(6).is_none());
        assert!(lookup_by_name("PS").is_none());
    }

    #[test]
    fn test_resolve_by_code_or_name() {
        assert_eq!(resolve("3").unwrap().name, "PVC");
        assert_eq!(resolve(" ldpe ").unwrap().grade, 4);
        assert!(matches!(resolve("7"), Err(Error::UnknownGrade(q)) if q == "7"));
        assert!(matches!(resolve("nylon"), Err(Error::UnknownGrade(_))));
    }
}
