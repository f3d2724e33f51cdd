//! Document viewer container.
//!
//! Owns the viewer state and executes the side effects produced by
//! [`ViewerStateMachine`]: fetching, wrapping payloads in object URLs,
//! releasing them and reporting failures.

use std::path::PathBuf;
use std::sync::Arc;

use mre_core::ports::{
    DocumentFetchPort, FetchError, FileSaverPort, NotificationPort, ObjectUrlPort, TranslatorPort,
};
use mre_core::{
    DocumentReference, FetchTicket, ObjectUrl, ViewerAction, ViewerEvent, ViewerState,
    ViewerStateMachine,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::usecases::messages::{CANNOT_SAVE_DOCUMENT, DOCUMENT_NOT_FOUND};
use crate::usecases::ObjectUrlLease;

/// What the UI should render for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerView {
    /// Render nothing.
    Hidden,
    /// Render a loading indicator.
    Loading { title: String },
    /// Render the document bound to `url`, with close and download actions.
    Document {
        title: String,
        url: ObjectUrl,
        content_type: String,
    },
}

/// State and the lease backing a `Ready` state.
///
/// `lease` is `Some` exactly when `state` is `Ready`, and holds the same url.
#[derive(Default)]
struct ViewerInner {
    state: ViewerState,
    lease: Option<ObjectUrlLease>,
    generation: u64,
}

impl ViewerInner {
    fn next_ticket(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket::new(self.generation)
    }
}

/// Container that presents one remote document at a time.
///
/// Errors never escape `open`/`close`: they are logged and surfaced through
/// the notification port. Dropping the viewer releases the live handle.
pub struct DocumentViewer {
    inner: Mutex<ViewerInner>,

    fetcher: Arc<dyn DocumentFetchPort>,
    object_urls: Arc<dyn ObjectUrlPort>,
    notifier: Arc<dyn NotificationPort>,
    translator: Arc<dyn TranslatorPort>,
    file_saver: Arc<dyn FileSaverPort>,
}

impl DocumentViewer {
    /// Constructs a closed viewer from its collaborators.
    pub fn from_ports(
        fetcher: Arc<dyn DocumentFetchPort>,
        object_urls: Arc<dyn ObjectUrlPort>,
        notifier: Arc<dyn NotificationPort>,
        translator: Arc<dyn TranslatorPort>,
        file_saver: Arc<dyn FileSaverPort>,
    ) -> Self {
        Self {
            inner: Mutex::new(ViewerInner::default()),
            fetcher,
            object_urls,
            notifier,
            translator,
            file_saver,
        }
    }

    /// Opens `reference`, replacing whatever was shown before.
    ///
    /// The previous handle is released before the new fetch starts. If a
    /// later `open` or `close` happens while this fetch is in flight, its
    /// result is discarded. Dropping the returned future before the fetch
    /// completes closes the viewer.
    #[tracing::instrument(
        name = "usecase.document_viewer.open",
        skip(self, reference),
        fields(locator = %reference.locator())
    )]
    pub async fn open(&self, reference: DocumentReference) {
        let fetch = {
            let mut inner = self.inner.lock().await;
            let ticket = inner.next_ticket();
            self.dispatch(&mut inner, ViewerEvent::Open { reference, ticket }, None)
        };
        let Some((ticket, reference)) = fetch else {
            debug!("open ignored: reference has no usable identifier");
            return;
        };

        // The state lock is not held across the network call.
        let mut abandoned = AbandonedFetch {
            viewer: self,
            ticket,
            armed: true,
        };
        let result = self.fetcher.fetch_document(&reference).await;

        let mut inner = self.inner.lock().await;
        abandoned.armed = false;
        if !inner.state.awaits(ticket) {
            debug!(ticket = %ticket, state = inner.state.name(), "discarding stale fetch result");
            return;
        }

        match result {
            Ok(payload) => {
                info!(
                    ticket = %ticket,
                    bytes = payload.len(),
                    content_type = payload.content_type(),
                    "document fetched"
                );
                let content_type = payload.content_type().to_string();
                let lease = ObjectUrlLease::acquire(self.object_urls.clone(), payload);
                let url = lease.url().clone();
                self.dispatch(
                    &mut inner,
                    ViewerEvent::DocumentLoaded {
                        ticket,
                        url,
                        content_type,
                    },
                    Some(lease),
                );
            }
            Err(error) => {
                self.dispatch(&mut inner, ViewerEvent::DocumentFailed { ticket, error }, None);
            }
        }
    }

    /// Closes the viewer, releasing the live handle if there is one.
    ///
    /// Calling it on a closed viewer does nothing.
    #[tracing::instrument(name = "usecase.document_viewer.close", skip(self))]
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        if inner.state.is_closed() {
            return;
        }
        self.dispatch(&mut inner, ViewerEvent::Close, None);
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> ViewerState {
        self.inner.lock().await.state.clone()
    }

    /// What the UI should render right now.
    pub async fn view(&self) -> ViewerView {
        let inner = self.inner.lock().await;
        match &inner.state {
            ViewerState::Closed | ViewerState::Failed { .. } => ViewerView::Hidden,
            ViewerState::Loading { reference, .. } => ViewerView::Loading {
                title: reference.title().to_string(),
            },
            ViewerState::Ready {
                reference,
                url,
                content_type,
                ..
            } => ViewerView::Document {
                title: reference.title().to_string(),
                url: url.clone(),
                content_type: content_type.clone(),
            },
        }
    }

    /// Saves the displayed document under its title.
    ///
    /// Returns the written path, or `None` when nothing is displayed or the
    /// save failed (the user is notified in that case).
    #[tracing::instrument(name = "usecase.document_viewer.download", skip(self))]
    pub async fn download(&self) -> Option<PathBuf> {
        let (payload, filename) = {
            let inner = self.inner.lock().await;
            let ViewerState::Ready { reference, url, .. } = &inner.state else {
                debug!(state = inner.state.name(), "download ignored: no document displayed");
                return None;
            };
            let Some(payload) = self.object_urls.resolve(url) else {
                warn!(url = %url, "displayed object url is not live");
                return None;
            };
            let filename = download_filename(reference.title(), payload.file_extension());
            (payload, filename)
        };

        match self
            .file_saver
            .save_as(payload.bytes().clone(), &filename)
            .await
        {
            Ok(path) => {
                info!(path = %path.display(), "document saved");
                Some(path)
            }
            Err(err) => {
                warn!(error = %err, filename = %filename, "document save failed");
                self.notifier
                    .notify_error(&self.translator.translate(CANNOT_SAVE_DOCUMENT));
                None
            }
        }
    }

    /// Runs `event` and its follow-ups through the state machine.
    ///
    /// `fresh` is a lease minted for a `DocumentLoaded` event; it is adopted
    /// when the resulting state displays it and released otherwise. Returns
    /// the fetch to perform, if the transitions asked for one.
    fn dispatch(
        &self,
        inner: &mut ViewerInner,
        event: ViewerEvent,
        mut fresh: Option<ObjectUrlLease>,
    ) -> Option<(FetchTicket, DocumentReference)> {
        let mut fetch = None;
        let mut pending_events = vec![event];

        while let Some(event) = pending_events.pop() {
            let current = std::mem::take(&mut inner.state);
            let from = current.name();
            let (next, actions) = ViewerStateMachine::transition(current, event);
            debug!(from, to = next.name(), "viewer state transition");
            inner.state = next;

            for action in actions {
                match action {
                    ViewerAction::ReleaseUrl { url } => {
                        Self::release(inner, &mut fresh, &url);
                    }
                    ViewerAction::FetchDocument { ticket, reference } => {
                        fetch = Some((ticket, reference));
                    }
                    ViewerAction::NotifyFailure { error } => {
                        self.report_failure(&error);
                        pending_events.push(ViewerEvent::FailureReported);
                    }
                }
            }
        }

        if let Some(lease) = fresh {
            if inner.state.live_url() == Some(lease.url()) {
                inner.lease = Some(lease);
            } else {
                Self::release_lease(lease);
            }
        }

        fetch
    }

    fn release(inner: &mut ViewerInner, fresh: &mut Option<ObjectUrlLease>, url: &ObjectUrl) {
        let lease = if inner.lease.as_ref().map(ObjectUrlLease::url) == Some(url) {
            inner.lease.take()
        } else if fresh.as_ref().map(ObjectUrlLease::url) == Some(url) {
            fresh.take()
        } else {
            None
        };

        match lease {
            Some(lease) => Self::release_lease(lease),
            None => warn!(url = %url, "release requested for a handle this viewer does not own"),
        }
    }

    fn release_lease(lease: ObjectUrlLease) {
        if let Err(err) = lease.release() {
            warn!(error = %err, "object url release failed");
        }
    }

    fn report_failure(&self, error: &FetchError) {
        warn!(error = %error, "document could not be shown");
        self.notifier
            .notify_error(&self.translator.translate(DOCUMENT_NOT_FOUND));
    }
}

/// Closes the viewer when `open` is dropped while its fetch is in flight.
struct AbandonedFetch<'a> {
    viewer: &'a DocumentViewer,
    ticket: FetchTicket,
    armed: bool,
}

impl Drop for AbandonedFetch<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.viewer.inner.try_lock() {
            Ok(mut inner) => {
                if inner.state.awaits(self.ticket) {
                    debug!(ticket = %self.ticket, "open cancelled, closing viewer");
                    self.viewer.dispatch(&mut inner, ViewerEvent::Close, None);
                }
            }
            Err(_) => {
                warn!(ticket = %self.ticket, "open cancelled while the viewer was locked");
            }
        }
    }
}

fn download_filename(title: &str, extension: &str) -> String {
    let stem = title.trim();
    let stem = if stem.is_empty() { "document" } else { stem };
    let suffix = format!(".{extension}");
    if stem.to_ascii_lowercase().ends_with(&suffix) {
        stem.to_string()
    } else {
        format!("{stem}{suffix}")
    }
}
