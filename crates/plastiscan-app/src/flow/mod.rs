//! Capture → analyzing → result screen flow

mod controller;
mod machine;

pub use controller::{ScreenFlowBuilder, ScreenFlowController};
pub use machine::{transition, Effect, FlowEvent, Screen, Session, Transition};
