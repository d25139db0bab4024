//! Serializable summary of a finished scan

use crate::flow::{Screen, Session};
use chrono::{DateTime, Utc};
use plastiscan_domain::{
    compute_impact_for, eco_tip, ImpactMetric, ImpactResult, ItemWeight, OceanThreat,
    PlasticGrade,
};
use plastiscan_types::ImageHandle;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub source: String,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub sha256: String,
}

impl From<&ImageHandle> for ImageSummary {
    fn from(image: &ImageHandle) -> Self {
        let (width, height) = image.dimensions();
        Self {
            source: image.source().label(),
            mime_type: image.format().to_mime_type(),
            width,
            height,
            sha256: image.digest(),
        }
    }
}

/// What the result screen shows, as data
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub analyzed_at: DateTime<Utc>,
    pub image: ImageSummary,
    pub grade: &'static PlasticGrade,
    pub weight: ItemWeight,
    pub impact: ImpactResult,
    pub metrics: [ImpactMetric; 4],
    pub ocean_threat: OceanThreat,
    pub decomposition_years: u32,
    pub eco_tip: &'static str,
}

impl ScanReport {
    pub fn new(image: &ImageHandle, grade: &'static PlasticGrade, weight: ItemWeight) -> Self {
        let impact = compute_impact_for(grade, weight);
        Self {
            analyzed_at: Utc::now(),
            image: ImageSummary::from(image),
            grade,
            weight,
            impact,
            metrics: impact.metrics(),
            ocean_threat: grade.impact.ocean_threat,
            decomposition_years: grade.impact.decomposition_years,
            eco_tip: eco_tip(grade),
        }
    }

    /// Report for a session on the result screen
    pub fn from_session(session: &Session) -> Option<Self> {
        if session.screen != Screen::Result {
            return None;
        }
        let image = session.captured_image.as_ref()?;
        let grade = session.detected_grade?;
        Some(Self::new(image, grade, session.item_weight))
    }
}
