//! Screen state machine
//!
//! `transition` is pure: it takes the current session and an event and
//! returns the next session plus the side effects the controller must run.
//! A rejected event leaves the caller's session untouched.

use plastiscan_domain::{compute_impact_for, ImpactResult, ItemWeight, PlasticGrade};
use plastiscan_types::{ImageHandle, ScanError};

/// Which view is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Capture,
    Analyzing,
    Result,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Capture => "capture",
            Screen::Analyzing => "analyzing",
            Screen::Result => "result",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-interaction state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub screen: Screen,
    pub captured_image: Option<ImageHandle>,
    pub detected_grade: Option<&'static PlasticGrade>,
    pub item_weight: ItemWeight,
    pub camera_active: bool,
}

impl Session {
    /// Target impact for the detected grade at the current weight
    pub fn impact(&self) -> Option<ImpactResult> {
        self.detected_grade
            .map(|grade| compute_impact_for(grade, self.item_weight))
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone)]
pub enum FlowEvent {
    CameraStarted,
    CameraStopped,
    ImageAcquired(ImageHandle),
    ClassificationResolved(&'static PlasticGrade),
    AnalysisCancelled,
    WeightChanged(f64),
    ScanAnother,
}

impl FlowEvent {
    pub fn label(&self) -> &'static str {
        match self {
            FlowEvent::CameraStarted => "start camera",
            FlowEvent::CameraStopped => "stop camera",
            FlowEvent::ImageAcquired(_) => "image acquired",
            FlowEvent::ClassificationResolved(_) => "classification resolved",
            FlowEvent::AnalysisCancelled => "analysis cancelled",
            FlowEvent::WeightChanged(_) => "weight changed",
            FlowEvent::ScanAnother => "scan another",
        }
    }
}

/// Side effects requested by a transition, run in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CloseCamera,
    Classify(ImageHandle),
    CancelAnalysis,
    StartAnimation(ImpactResult),
    CancelAnimation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(session: Session) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Compute the next session for `event`
pub fn transition(session: &Session, event: FlowEvent) -> Result<Transition, ScanError> {
    use FlowEvent::*;

    let reject = |event: &FlowEvent| ScanError::InvalidTransition {
        screen: session.screen.label(),
        event: event.label(),
    };

    match (session.screen, event) {
        (Screen::Capture, CameraStarted) => Ok(Transition::to(Session {
            camera_active: true,
            ..session.clone()
        })),

        (Screen::Capture, CameraStopped) => {
            let next = Transition::to(Session {
                camera_active: false,
                ..session.clone()
            });
            Ok(if session.camera_active {
                next.with(Effect::CloseCamera)
            } else {
                next
            })
        }

        (Screen::Capture, ImageAcquired(image)) => {
            let mut next = Transition::to(Session {
                screen: Screen::Analyzing,
                captured_image: Some(image.clone()),
                detected_grade: None,
                camera_active: false,
                ..session.clone()
            });
            if session.camera_active {
                next = next.with(Effect::CloseCamera);
            }
            Ok(next.with(Effect::Classify(image)))
        }

        (Screen::Analyzing, ImageAcquired(_)) => Err(ScanError::BusyAnalyzing),

        (Screen::Analyzing, ClassificationResolved(grade)) => {
            let next = Session {
                screen: Screen::Result,
                detected_grade: Some(grade),
                item_weight: ItemWeight::default(),
                ..session.clone()
            };
            let target = compute_impact_for(grade, next.item_weight);
            Ok(Transition::to(next).with(Effect::StartAnimation(target)))
        }

        (Screen::Analyzing, AnalysisCancelled) => {
            Ok(Transition::to(Session::default()).with(Effect::CancelAnalysis))
        }

        (Screen::Result, WeightChanged(kg)) => {
            let next = Session {
                item_weight: ItemWeight::clamped(kg),
                ..session.clone()
            };
            let target = next.impact().ok_or_else(|| reject(&WeightChanged(kg)))?;
            Ok(Transition::to(next).with(Effect::StartAnimation(target)))
        }

        (Screen::Result, ScanAnother) => Ok(Transition::to(Session::default())
            .with(Effect::CancelAnimation)
            .with(Effect::CloseCamera)),

        (_, event) => Err(reject(&event)),
    }
}
