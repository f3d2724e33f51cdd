//! Document viewer domain module.
//!
//! This module defines the presentation state machine shared by every
//! document viewer container.

pub mod state_machine;

pub use state_machine::{FetchTicket, ViewerAction, ViewerEvent, ViewerState, ViewerStateMachine};
