//! Output formatting module

use plastiscan_app::ScanReport;
use plastiscan_domain::{
    compute_impact_for, eco_tip, ImpactMetric, ImpactResult, ItemWeight, PlasticGrade,
};
use plastiscan_types::{OutputFormat, Result};
use serde::Serialize;

/// Impact of a grade at a weight, without an image
#[derive(Debug, Serialize)]
pub struct ImpactSummary {
    pub grade: &'static PlasticGrade,
    pub weight: ItemWeight,
    pub impact: ImpactResult,
    pub metrics: [ImpactMetric; 4],
    pub eco_tip: &'static str,
}

impl ImpactSummary {
    pub fn new(grade: &'static PlasticGrade, weight: ItemWeight) -> Self {
        let impact = compute_impact_for(grade, weight);
        Self {
            grade,
            weight,
            impact,
            metrics: impact.metrics(),
            eco_tip: eco_tip(grade),
        }
    }
}

pub fn output_report(output_format: OutputFormat, report: &ScanReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nScan Result");
    println!("===========");
    println!(
        "Image:           {} ({}x{}, {})",
        report.image.source, report.image.width, report.image.height, report.image.mime_type
    );
    print_grade(report.grade);
    println!("Weight:          {}", report.weight);

    print_metrics(&report.metrics);

    println!("Ocean threat:    {}", report.ocean_threat);
    println!("Decomposes in:   {} years", report.decomposition_years);
    println!("\nEco tip: {}", report.eco_tip);
    println!("\n{}", report.grade.description);
    println!("Common examples: {}", report.grade.examples.join(", "));

    Ok(())
}

pub fn output_impact(output_format: OutputFormat, summary: &ImpactSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\nImpact Calculator");
    println!("=================");
    print_grade(summary.grade);
    println!("Weight:          {}", summary.weight);
    print_metrics(&summary.metrics);
    println!("\nEco tip: {}", summary.eco_tip);

    Ok(())
}

pub fn output_grades(output_format: OutputFormat, grades: &[PlasticGrade]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(grades)?);
        return Ok(());
    }

    println!(
        "{:<4} {:<6} {:<30} {:<10} {:>8} {:>10} {:>9}",
        "Code", "Name", "Full name", "Recyclable", "CO₂/kg", "Decompose", "Recycled"
    );
    println!("{}", "-".repeat(83));
    for grade in grades {
        println!(
            "#{:<3} {:<6} {:<30} {:<10} {:>8.1} {:>8} y {:>8.0}%",
            grade.grade,
            grade.name,
            grade.full_name,
            if grade.recyclable { "Yes" } else { "No" },
            grade.impact.carbon_footprint,
            grade.impact.decomposition_years,
            grade.impact.recycling_rate,
        );
    }

    Ok(())
}

fn print_grade(grade: &PlasticGrade) {
    println!("Grade:           {}", grade);
    println!(
        "Recyclable:      {}",
        if grade.recyclable { "Yes" } else { "No" }
    );
}

fn print_metrics(metrics: &[ImpactMetric]) {
    println!("\n--- Environmental Impact ---");
    for metric in metrics {
        println!(
            "{:<17} {:>8} {:<7} {}",
            metric.label, metric.value, metric.unit, metric.description
        );
    }
    println!("----------------------------");
}
