//! Count-up sequence for displayed impact figures
//!
//! The sequence is pure: it only says which values to show at which offset.
//! Timing and cancellation are the caller's concern.

use crate::model::ImpactResult;
use std::time::Duration;

pub const DEFAULT_STEPS: u32 = 60;
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// One step of the count-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// 1-based step index
    pub step: u32,
    /// Offset from the start of the animation
    pub at: Duration,
    pub values: ImpactResult,
}

impl AnimationFrame {
    pub fn is_last(&self, steps: u32) -> bool {
        self.step >= steps
    }
}

/// Linear ramp from zero to `target` over a fixed number of steps
#[derive(Debug, Clone)]
pub struct ImpactAnimation {
    target: ImpactResult,
    steps: u32,
    duration: Duration,
    next_step: u32,
}

impl ImpactAnimation {
    /// `steps` is raised to at least 1
    pub fn new(target: ImpactResult, steps: u32, duration: Duration) -> Self {
        Self {
            target,
            steps: steps.max(1),
            duration,
            next_step: 1,
        }
    }

    pub fn with_defaults(target: ImpactResult) -> Self {
        Self::new(target, DEFAULT_STEPS, DEFAULT_DURATION)
    }

    pub fn target(&self) -> ImpactResult {
        self.target
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Time between two frames
    pub fn step_duration(&self) -> Duration {
        self.duration / self.steps
    }
}

impl Iterator for ImpactAnimation {
    type Item = AnimationFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_step > self.steps {
            return None;
        }
        let step = self.next_step;
        self.next_step += 1;

        let values = if step == self.steps {
            self.target
        } else {
            self.target.scaled(step as f64 / self.steps as f64)
        };

        Some(AnimationFrame {
            step,
            at: self.duration * step / self.steps,
            values,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next_step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ImpactAnimation {}
