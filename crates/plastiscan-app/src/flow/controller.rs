//! Screen flow controller
//!
//! Owns the session and every resource it references: the camera stream, the
//! in-flight analysis and the impact animation. Each operation feeds an event
//! through `transition` and then runs the returned effects, so the session and
//! the resources never disagree.

use super::machine::{transition, Effect, FlowEvent, Screen, Session, Transition};
use crate::config::Config;
use crate::presentation::ImpactAnimator;
use plastiscan_domain::service::impact_animation::{DEFAULT_DURATION, DEFAULT_STEPS};
use plastiscan_domain::{ImpactResult, PlasticGrade};
use plastiscan_types::{ImageHandle, ScanError};
use plastiscan_vision::{
    read_selected_file, visible_analysis_steps, CameraDevice, CameraStream, Classifier,
    FrameDirectoryCamera, NoCamera, RandomClassifier,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type Outcome = Result<&'static PlasticGrade, ScanError>;

struct PendingAnalysis {
    result: oneshot::Receiver<Outcome>,
    token: CancellationToken,
    started: Instant,
}

pub struct ScreenFlowController {
    session: Session,
    classifier: Arc<dyn Classifier>,
    camera: Box<dyn CameraDevice>,
    stream: Option<CameraStream>,
    pending: Option<PendingAnalysis>,
    animator: ImpactAnimator,
    runtime: Handle,
    analysis_timeout: Option<Duration>,
}

impl ScreenFlowController {
    pub fn builder(runtime: Handle) -> ScreenFlowBuilder {
        ScreenFlowBuilder::new(runtime)
    }

    /// Controller wired the way the config describes: random classifier,
    /// frame-directory camera when a directory is set, no camera otherwise
    pub fn from_config(config: &Config, runtime: Handle) -> Self {
        let classifier = match config.seed {
            Some(seed) => RandomClassifier::with_seed(config.analysis_delay(), seed),
            None => RandomClassifier::new(config.analysis_delay()),
        };
        let camera: Box<dyn CameraDevice> = match &config.camera_frames_dir {
            Some(dir) => Box::new(FrameDirectoryCamera::new(dir)),
            None => Box::new(NoCamera),
        };

        Self::builder(runtime)
            .classifier(Arc::new(classifier))
            .camera(camera)
            .animation(config.animation_steps, config.animation_duration())
            .analysis_timeout(config.analysis_timeout())
            .build()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.session.screen
    }

    pub fn camera_name(&self) -> &str {
        self.camera.name()
    }

    pub fn is_camera_active(&self) -> bool {
        self.stream.as_ref().is_some_and(|s| s.is_open())
    }

    /// Time since the current analysis started
    pub fn analysis_elapsed(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.started.elapsed())
    }

    /// Number of progress captions to show for the current analysis
    pub fn visible_steps(&self) -> usize {
        self.analysis_elapsed()
            .map(visible_analysis_steps)
            .unwrap_or(0)
    }

    /// Open the camera. On failure the session stays on the capture screen
    /// with the camera off.
    pub fn start_camera(&mut self) -> Result<(), ScanError> {
        let next = transition(&self.session, FlowEvent::CameraStarted)?;
        if self.is_camera_active() {
            return Ok(());
        }

        let stream = self.camera.open().map_err(|e| {
            warn!(device = self.camera.name(), error = %e, "camera unavailable");
            e
        })?;
        info!(device = stream.device(), "camera started");
        self.stream = Some(stream);
        self.commit("start camera", next);
        Ok(())
    }

    pub fn stop_camera(&mut self) -> Result<(), ScanError> {
        self.dispatch(FlowEvent::CameraStopped)
    }

    /// Grab a frame from the running camera and start analysing it
    pub fn capture_photo(&mut self) -> Result<(), ScanError> {
        self.ensure_can_acquire()?;
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| ScanError::DeviceUnavailable("camera is not started".to_string()))?;
        let image = stream.capture().map_err(|e| {
            warn!(error = %e, "capture failed");
            e
        })?;
        self.dispatch(FlowEvent::ImageAcquired(image))
    }

    /// Start analysing the file the user picked. `None` means the picker was
    /// dismissed.
    pub fn upload(&mut self, path: Option<&Path>) -> Result<(), ScanError> {
        self.ensure_can_acquire()?;
        let image = read_selected_file(path).map_err(|e| {
            warn!(error = %e, "upload rejected");
            e
        })?;
        self.dispatch(FlowEvent::ImageAcquired(image))
    }

    /// Apply finished work without blocking. Returns true if anything the
    /// user sees changed.
    pub fn pump(&mut self) -> Result<bool, ScanError> {
        let mut changed = false;

        if let Some(pending) = self.pending.as_mut() {
            let outcome = match pending.result.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(Err(ScanError::AnalysisCancelled)),
            };
            if let Some(outcome) = outcome {
                self.resolve(outcome)?;
                changed = true;
            }
        }

        changed |= self.animator.drain();
        Ok(changed)
    }

    /// Wait for the in-flight analysis and apply its outcome
    pub async fn wait_for_result(&mut self) -> Result<&'static PlasticGrade, ScanError> {
        let pending = self.pending.as_mut().ok_or(ScanError::InvalidTransition {
            screen: self.session.screen.label(),
            event: "wait for result",
        })?;
        let outcome = (&mut pending.result)
            .await
            .unwrap_or(Err(ScanError::AnalysisCancelled));
        self.resolve(outcome)
    }

    /// Abandon the in-flight analysis and go back to the capture screen
    pub fn cancel_analysis(&mut self) -> Result<(), ScanError> {
        self.dispatch(FlowEvent::AnalysisCancelled)
    }

    pub fn set_weight(&mut self, kg: f64) -> Result<(), ScanError> {
        self.dispatch(FlowEvent::WeightChanged(kg))
    }

    pub fn scan_another(&mut self) -> Result<(), ScanError> {
        self.dispatch(FlowEvent::ScanAnother)
    }

    /// Values currently shown by the count-up
    pub fn displayed_impact(&self) -> ImpactResult {
        self.animator.current()
    }

    /// Final values for the current grade and weight
    pub fn target_impact(&self) -> Option<ImpactResult> {
        self.session.impact()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Wait until the displayed values reach their target
    pub async fn settle_animation(&mut self) {
        self.animator.settle().await;
    }

    fn ensure_can_acquire(&self) -> Result<(), ScanError> {
        match self.session.screen {
            Screen::Capture => Ok(()),
            Screen::Analyzing => Err(ScanError::BusyAnalyzing),
            Screen::Result => Err(ScanError::InvalidTransition {
                screen: self.session.screen.label(),
                event: "image acquired",
            }),
        }
    }

    fn resolve(&mut self, outcome: Outcome) -> Result<&'static PlasticGrade, ScanError> {
        self.pending = None;
        match outcome {
            Ok(grade) => {
                info!(grade = grade.grade, name = grade.name, "classification resolved");
                self.dispatch(FlowEvent::ClassificationResolved(grade))?;
                Ok(grade)
            }
            Err(e) => {
                warn!(error = %e, "analysis did not complete");
                if self.session.screen == Screen::Analyzing {
                    self.dispatch(FlowEvent::AnalysisCancelled)?;
                }
                Err(e)
            }
        }
    }

    fn dispatch(&mut self, event: FlowEvent) -> Result<(), ScanError> {
        let label = event.label();
        let next = transition(&self.session, event).map_err(|e| {
            debug!(screen = %self.session.screen, event = label, error = %e, "event rejected");
            e
        })?;
        self.commit(label, next);
        Ok(())
    }

    fn commit(&mut self, event: &str, next: Transition) {
        let Transition { session, effects } = next;
        if session.screen != self.session.screen {
            info!(from = %self.session.screen, to = %session.screen, event, "screen changed");
        }
        self.session = session;
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::CloseCamera => {
                if let Some(mut stream) = self.stream.take() {
                    stream.close();
                    info!(device = stream.device(), "camera stopped");
                }
            }
            Effect::Classify(image) => self.spawn_analysis(image),
            Effect::CancelAnalysis => {
                if let Some(pending) = self.pending.take() {
                    pending.token.cancel();
                    info!("analysis cancelled");
                }
            }
            Effect::StartAnimation(target) => self.animator.restart(target),
            Effect::CancelAnimation => self.animator.cancel(),
        }
    }

    fn spawn_analysis(&mut self, image: ImageHandle) {
        if let Some(previous) = self.pending.take() {
            previous.token.cancel();
        }

        let (tx, rx) = oneshot::channel();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let classifier = Arc::clone(&self.classifier);
        let timeout = self.analysis_timeout;

        info!(image = %image.id(), source = %image.source().label(), "analysis started");
        self.runtime.spawn(async move {
            let work = async {
                match timeout {
                    Some(limit) => tokio::time::timeout(limit, classifier.classify(&image))
                        .await
                        .unwrap_or(Err(ScanError::AnalysisCancelled)),
                    None => classifier.classify(&image).await,
                }
            };
            let outcome = tokio::select! {
                _ = cancelled.cancelled() => Err(ScanError::AnalysisCancelled),
                outcome = work => outcome,
            };
            let _ = tx.send(outcome);
        });

        self.pending = Some(PendingAnalysis {
            result: rx,
            token,
            started: Instant::now(),
        });
    }
}

impl Drop for ScreenFlowController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }
}

pub struct ScreenFlowBuilder {
    runtime: Handle,
    classifier: Option<Arc<dyn Classifier>>,
    camera: Option<Box<dyn CameraDevice>>,
    animation_steps: u32,
    animation_duration: Duration,
    analysis_timeout: Option<Duration>,
}

impl ScreenFlowBuilder {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            classifier: None,
            camera: None,
            animation_steps: DEFAULT_STEPS,
            animation_duration: DEFAULT_DURATION,
            analysis_timeout: None,
        }
    }

    pub fn classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn camera(mut self, camera: Box<dyn CameraDevice>) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn animation(mut self, steps: u32, duration: Duration) -> Self {
        self.animation_steps = steps;
        self.animation_duration = duration;
        self
    }

    pub fn analysis_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    /// Missing parts default to `RandomClassifier::default()` and `NoCamera`
    pub fn build(self) -> ScreenFlowController {
        let classifier = self
            .classifier
            .unwrap_or_else(|| Arc::new(RandomClassifier::default()));
        let camera = self.camera.unwrap_or_else(|| Box::new(NoCamera));
        let animator = ImpactAnimator::new(
            self.runtime.clone(),
            self.animation_steps,
            self.animation_duration,
        );

        ScreenFlowController {
            session: Session::default(),
            classifier,
            camera,
            stream: None,
            pending: None,
            animator,
            runtime: self.runtime,
            analysis_timeout: self.analysis_timeout,
        }
    }
}
