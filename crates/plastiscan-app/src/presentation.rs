//! Animated impact figures
//!
//! `ImpactAnimator` runs one count-up at a time on the tokio runtime and
//! exposes the most recently reached values. Every restart bumps a generation
//! counter; frames tagged with an older generation are dropped on receipt, so
//! a superseded animation can never overwrite a newer one.

use futures::{stream, Stream, StreamExt};
use plastiscan_domain::{AnimationFrame, ImpactAnimation, ImpactResult};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Frames of `animation` at their scheduled offsets, ending early once
/// `token` is cancelled
pub fn frame_stream(
    animation: ImpactAnimation,
    token: CancellationToken,
) -> impl Stream<Item = AnimationFrame> + Send + 'static {
    let start = Instant::now();
    stream::iter(animation)
        .then(move |frame| async move {
            sleep_until(start + frame.at).await;
            frame
        })
        .take_until(token.cancelled_owned())
}

type Tagged = (u64, AnimationFrame);

pub struct ImpactAnimator {
    runtime: Handle,
    steps: u32,
    duration: Duration,
    generation: u64,
    tx: UnboundedSender<Tagged>,
    rx: UnboundedReceiver<Tagged>,
    token: Option<CancellationToken>,
    current: ImpactResult,
    target: Option<ImpactResult>,
    running: bool,
}

impl ImpactAnimator {
    pub fn new(runtime: Handle, steps: u32, duration: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            steps: steps.max(1),
            duration,
            generation: 0,
            tx,
            rx,
            token: None,
            current: ImpactResult::default(),
            target: None,
            running: false,
        }
    }

    /// Start counting up from zero towards `target`, superseding any running
    /// animation
    pub fn restart(&mut self, target: ImpactResult) {
        self.stop_task();
        self.generation += 1;
        self.current = ImpactResult::default();
        self.target = Some(target);
        self.running = true;

        let token = CancellationToken::new();
        let frames = frame_stream(
            ImpactAnimation::new(target, self.steps, self.duration),
            token.clone(),
        );
        let generation = self.generation;
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            futures::pin_mut!(frames);
            while let Some(frame) = frames.next().await {
                if tx.send((generation, frame)).is_err() {
                    break;
                }
            }
        });
        self.token = Some(token);
        debug!(generation, steps = self.steps, "impact animation started");
    }

    /// Stop the running animation and forget its target
    pub fn cancel(&mut self) {
        self.stop_task();
        self.generation += 1;
        self.current = ImpactResult::default();
        self.target = None;
        self.running = false;
    }

    /// Apply every frame received so far. Returns true if the displayed
    /// values changed.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(tagged) = self.rx.try_recv() {
            changed |= self.apply(tagged);
        }
        changed
    }

    /// Wait for the running animation to reach its final frame
    pub async fn settle(&mut self) {
        self.drain();
        while self.running {
            match self.rx.recv().await {
                Some(tagged) => {
                    self.apply(tagged);
                }
                None => break,
            }
        }
    }

    /// Values currently on screen
    pub fn current(&self) -> ImpactResult {
        self.current
    }

    /// Value the running or finished animation converges to
    pub fn target(&self) -> Option<ImpactResult> {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn apply(&mut self, (generation, frame): Tagged) -> bool {
        if generation != self.generation {
            return false;
        }
        self.current = frame.values;
        if frame.is_last(self.steps) {
            self.running = false;
            self.token = None;
        }
        true
    }

    fn stop_task(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

impl Drop for ImpactAnimator {
    fn drop(&mut self) {
        self.stop_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plastiscan_domain::{compute_impact, lookup};

    fn animator() -> ImpactAnimator {
        ImpactAnimator::new(Handle::current(), 60, Duration::from_millis(2000))
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_stream_follows_schedule() {
        let target = compute_impact(lookup(1).unwrap(), 0.5);
        let start = Instant::now();
        let frames: Vec<_> = frame_stream(
            ImpactAnimation::new(target, 4, Duration::from_millis(400)),
            CancellationToken::new(),
        )
        .collect()
        .await;

        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].values, target);
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_stream_stops_on_cancel() {
        let target = compute_impact(lookup(1).unwrap(), 0.5);
        let token = CancellationToken::new();
        token.cancel();
        let frames: Vec<_> = frame_stream(ImpactAnimation::with_defaults(target), token)
            .collect()
            .await;
        assert!(frames.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_reaches_target() {
        let target = compute_impact(lookup(2).unwrap(), 1.2);
        let mut animator = animator();

        animator.restart(target);
        assert!(animator.is_running());
        animator.settle().await;

        assert!(!animator.is_running());
        assert!(animator.current().approx_eq(&target, 1e-9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_ramp_up() {
        let target = compute_impact(lookup(5).unwrap(), 2.0);
        let mut animator = animator();
        animator.restart(target);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        animator.drain();
        let halfway = animator.current();
        assert!(halfway.carbon > 0.0);
        assert!(halfway.carbon < target.carbon);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_discards_stale_frames() {
        let first = compute_impact(lookup(4).unwrap(), 2.0);
        let second = compute_impact(lookup(4).unwrap(), 0.1);
        let mut animator = animator();

        animator.restart(first);
        tokio::time::sleep(Duration::from_millis(500)).await;
        animator.restart(second);
        animator.settle().await;

        // let any frame the superseded task managed to queue arrive
        tokio::time::sleep(Duration::from_millis(3000)).await;
        animator.drain();
        assert!(animator.current().approx_eq(&second, 1e-9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_resets_values() {
        let target = compute_impact(lookup(3).unwrap(), 1.0);
        let mut animator = animator();
        animator.restart(target);
        tokio::time::sleep(Duration::from_millis(700)).await;

        animator.cancel();
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(!animator.drain());
        assert_eq!(animator.current(), ImpactResult::default());
        assert!(animator.target().is_none());
    }
}
