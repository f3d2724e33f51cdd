//! Hand-written fakes shared by the use case tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use mre_app::DocumentViewer;
use mre_core::ports::{
    DocumentFetchPort, FetchError, FileSaverPort, NotificationPort, ObjectUrlError,
    ObjectUrlPort, SaveError, TranslatorPort,
};
use mre_core::{DocumentPayload, DocumentReference, ObjectUrl};
use tokio::sync::oneshot;

pub fn pdf(content: &'static [u8]) -> DocumentPayload {
    DocumentPayload::new(Bytes::from_static(content), "application/pdf")
}

pub fn doc(url: &str) -> DocumentReference {
    DocumentReference::from_url(url, "Lease")
}

/// Fetcher keyed by request path; paths can be held back until released.
#[derive(Default)]
pub struct FakeFetcher {
    responses: Mutex<HashMap<String, Result<DocumentPayload, FetchError>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn respond(&self, path: &str, result: Result<DocumentPayload, FetchError>) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), result);
    }

    /// Holds the next fetch of `path` until the returned sender fires.
    pub fn hold(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn wait_for_calls(&self, expected: usize) {
        while self.calls() < expected {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DocumentFetchPort for FakeFetcher {
    async fn fetch_document(
        &self,
        reference: &DocumentReference,
    ) -> Result<DocumentPayload, FetchError> {
        let path = reference.locator().request_path("/api/v2/documents");
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().remove(&path);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(path)))
    }
}

/// Object URL port that counts every acquire and release.
#[derive(Default)]
pub struct CountingObjectUrls {
    live: Mutex<HashMap<ObjectUrl, DocumentPayload>>,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl CountingObjectUrls {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    pub fn resolve_payload(&self, url: &ObjectUrl) -> Option<DocumentPayload> {
        self.live.lock().unwrap().get(url).cloned()
    }
}

impl ObjectUrlPort for CountingObjectUrls {
    fn acquire(&self, payload: DocumentPayload) -> ObjectUrl {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        let url = ObjectUrl::new();
        self.live.lock().unwrap().insert(url.clone(), payload);
        url
    }

    fn release(&self, url: &ObjectUrl) -> Result<(), ObjectUrlError> {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.live
            .lock()
            .unwrap()
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| ObjectUrlError::UnknownHandle(url.to_string()))
    }

    fn resolve(&self, url: &ObjectUrl) -> Option<DocumentPayload> {
        self.live.lock().unwrap().get(url).cloned()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Translator backed by a fixed table; unknown keys come back untouched.
///
/// The default table holds the English texts.
pub struct TableTranslator {
    entries: HashMap<String, String>,
}

impl Default for TableTranslator {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
        .with("document-not-found", "Document not found")
        .with("cannot-save-document", "Cannot save document")
        .with("invoice", "invoice")
    }
}

impl TableTranslator {
    pub fn with(mut self, key: &str, text: &str) -> Self {
        self.entries.insert(key.to_string(), text.to_string());
        self
    }
}

impl TranslatorPort for TableTranslator {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// File saver that remembers what it was asked to write.
#[derive(Default)]
pub struct MemoryFileSaver {
    saved: Mutex<Vec<(String, Bytes)>>,
}

impl MemoryFileSaver {
    pub fn saved(&self) -> Vec<(String, Bytes)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSaverPort for MemoryFileSaver {
    async fn save_as(&self, bytes: Bytes, filename: &str) -> Result<PathBuf, SaveError> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes));
        Ok(PathBuf::from("/downloads").join(filename))
    }
}

pub struct ViewerHarness {
    pub fetcher: Arc<FakeFetcher>,
    pub object_urls: Arc<CountingObjectUrls>,
    pub notifier: Arc<RecordingNotifier>,
    pub file_saver: Arc<MemoryFileSaver>,
    pub viewer: Arc<DocumentViewer>,
}

pub fn viewer_harness() -> ViewerHarness {
    let fetcher = Arc::new(FakeFetcher::default());
    let object_urls = Arc::new(CountingObjectUrls::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let file_saver = Arc::new(MemoryFileSaver::default());
    let viewer = Arc::new(DocumentViewer::from_ports(
        fetcher.clone(),
        object_urls.clone(),
        notifier.clone(),
        Arc::new(TableTranslator::default()),
        file_saver.clone(),
    ));
    ViewerHarness {
        fetcher,
        object_urls,
        notifier,
        file_saver,
        viewer,
    }
}
