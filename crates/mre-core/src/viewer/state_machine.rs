//! Viewer state machine.
//!
//! Defines a pure state transition function for the document viewer. Side
//! effects (fetching, releasing handles, notifying) are returned as actions
//! and executed by the owning container.

use std::fmt;

use crate::document::{DocumentReference, ObjectUrl};
use crate::ports::FetchError;

/// Generation number of one `open` cycle.
///
/// Results carrying a ticket other than the one the viewer is waiting for
/// are stale and must not change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Viewer presentation state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    /// Nothing is shown.
    #[default]
    Closed,
    /// A fetch for `reference` is in flight.
    Loading {
        ticket: FetchTicket,
        reference: DocumentReference,
    },
    /// The document is displayed through exactly one live handle.
    Ready {
        ticket: FetchTicket,
        reference: DocumentReference,
        url: ObjectUrl,
        content_type: String,
    },
    /// The fetch failed; the failure still has to be reported.
    Failed {
        reference: DocumentReference,
        error: FetchError,
    },
}

impl ViewerState {
    /// The live handle, if any.
    pub fn live_url(&self) -> Option<&ObjectUrl> {
        match self {
            ViewerState::Ready { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Whether a result for `ticket` would still be accepted.
    pub fn awaits(&self, ticket: FetchTicket) -> bool {
        matches!(self, ViewerState::Loading { ticket: current, .. } if *current == ticket)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ViewerState::Closed)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewerState::Closed => "closed",
            ViewerState::Loading { .. } => "loading",
            ViewerState::Ready { .. } => "ready",
            ViewerState::Failed { .. } => "failed",
        }
    }
}

/// Events that drive the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// User opens a document.
    Open {
        reference: DocumentReference,
        ticket: FetchTicket,
    },
    /// User closes the viewer.
    Close,
    /// The fetch for `ticket` succeeded and its payload was wrapped in `url`.
    DocumentLoaded {
        ticket: FetchTicket,
        url: ObjectUrl,
        content_type: String,
    },
    /// The fetch for `ticket` failed.
    DocumentFailed {
        ticket: FetchTicket,
        error: FetchError,
    },
    /// The failure notification went out.
    FailureReported,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerAction {
    /// Give back a handle that is no longer displayed.
    ReleaseUrl { url: ObjectUrl },
    /// Start fetching `reference` for `ticket`.
    FetchDocument {
        ticket: FetchTicket,
        reference: DocumentReference,
    },
    /// Tell the user the document could not be shown.
    NotifyFailure { error: FetchError },
}

/// Pure viewer state machine.
pub struct ViewerStateMachine;

impl ViewerStateMachine {
    pub fn transition(state: ViewerState, event: ViewerEvent) -> (ViewerState, Vec<ViewerAction>) {
        match (state, event) {
            (state, ViewerEvent::Open { reference, ticket }) => {
                let mut actions = Self::release_held(&state);
                if !reference.is_usable() {
                    return (ViewerState::Closed, actions);
                }
                actions.push(ViewerAction::FetchDocument {
                    ticket,
                    reference: reference.clone(),
                });
                (ViewerState::Loading { ticket, reference }, actions)
            }
            (state, ViewerEvent::Close) => {
                let actions = Self::release_held(&state);
                (ViewerState::Closed, actions)
            }
            (
                ViewerState::Loading {
                    ticket: current,
                    reference,
                },
                ViewerEvent::DocumentLoaded {
                    ticket,
                    url,
                    content_type,
                },
            ) if current == ticket => (
                ViewerState::Ready {
                    ticket,
                    reference,
                    url,
                    content_type,
                },
                Vec::new(),
            ),
            // A handle minted for a result nobody waits for goes straight back.
            (state, ViewerEvent::DocumentLoaded { url, .. }) => {
                (state, vec![ViewerAction::ReleaseUrl { url }])
            }
            (
                ViewerState::Loading {
                    ticket: current,
                    reference,
                },
                ViewerEvent::DocumentFailed { ticket, error },
            ) if current == ticket => (
                ViewerState::Failed {
                    reference,
                    error: error.clone(),
                },
                vec![ViewerAction::NotifyFailure { error }],
            ),
            (ViewerState::Failed { .. }, ViewerEvent::FailureReported) => {
                (ViewerState::Closed, Vec::new())
            }
            (state, _event) => (state, Vec::new()),
        }
    }

    fn release_held(state: &ViewerState) -> Vec<ViewerAction> {
        state
            .live_url()
            .map(|url| vec![ViewerAction::ReleaseUrl { url: url.clone() }])
            .unwrap_or_default()
    }
}
