//! Plastic grade classification
//!
//! `Classifier` is the seam a real model plugs into. `RandomClassifier` is the
//! placeholder: it waits a fixed delay and picks a grade uniformly at random,
//! ignoring the image content.

use async_trait::async_trait;
use plastiscan_domain::{lookup_all, PlasticGrade};
use plastiscan_types::{ImageHandle, ScanError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Progress captions shown while an analysis runs
pub const ANALYSIS_STEPS: [&str; 3] = [
    "Capturing image features...",
    "Processing with AI...",
    "Calculating environmental impact...",
];

const FIRST_STEP_AT: Duration = Duration::from_millis(1000);
const STEP_INTERVAL: Duration = Duration::from_millis(800);

/// Number of captions revealed `elapsed` after the analysis started
pub fn visible_analysis_steps(elapsed: Duration) -> usize {
    if elapsed < FIRST_STEP_AT {
        return 0;
    }
    let since_first = (elapsed - FIRST_STEP_AT).as_millis() / STEP_INTERVAL.as_millis();
    (since_first as usize + 1).min(ANALYSIS_STEPS.len())
}

/// Maps an image to a catalog grade.
///
/// Latency is bounded by the implementation; the only failure callers should
/// expect is cancellation.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &ImageHandle) -> Result<&'static PlasticGrade, ScanError>;
}

/// Uniform random pick from the catalog after a fixed delay
pub struct RandomClassifier {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl RandomClassifier {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence of picks
    pub fn with_seed(delay: Duration, seed: u64) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn pick(&self) -> &'static PlasticGrade {
        let grades = lookup_all();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        &grades[rng.gen_range(0..grades.len())]
    }
}

impl Default for RandomClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Classifier for RandomClassifier {
    async fn classify(&self, image: &ImageHandle) -> Result<&'static PlasticGrade, ScanError> {
        debug!(image = %image.id(), delay_ms = self.delay.as_millis() as u64, "simulating analysis");
        tokio::time::sleep(self.delay).await;
        Ok(self.pick())
    }
}
