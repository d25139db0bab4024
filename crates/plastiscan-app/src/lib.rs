//! Application layer - screen flow, configuration, logging, reports

pub mod config;
pub mod flow;
pub mod logging;
pub mod presentation;
pub mod report;

pub use config::Config;
pub use flow::{FlowEvent, Screen, ScreenFlowBuilder, ScreenFlowController, Session};
pub use presentation::ImpactAnimator;
pub use report::ScanReport;
