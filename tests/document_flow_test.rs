//! End-to-end flows through the wired adapters against a mock API.

use mockito::Server;
use mre_core::ports::ObjectUrlPort;
use mre_documents::{wire_dependencies, AppConfig, DocumentReference, TenantRef, ViewerView};
use tempfile::TempDir;

fn config(base_url: String, downloads: &TempDir, locale: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = base_url;
    config.api.access_token = Some("token".to_string());
    config.storage.download_dir = Some(downloads.path().to_path_buf());
    config.i18n.locale = locale.to_string();
    config
}

#[tokio::test]
async fn viewer_displays_fetched_document_and_releases_on_close() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/docs/lease.pdf")
        .match_header("authorization", "Bearer token")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.7 lease")
        .create_async()
        .await;
    let downloads = TempDir::new().unwrap();
    let deps = wire_dependencies(&config(server.url(), &downloads, "en")).unwrap();

    deps.viewer
        .open(DocumentReference::from_url("/docs/lease.pdf", "Lease"))
        .await;

    mock.assert_async().await;
    let ViewerView::Document { url, content_type, .. } = deps.viewer.view().await else {
        panic!("document should be displayed");
    };
    assert_eq!(content_type, "application/pdf");
    let payload = deps.object_urls.resolve(&url).expect("live object url");
    assert_eq!(&payload.bytes()[..], b"%PDF-1.7 lease");

    deps.viewer.close().await;

    assert_eq!(deps.viewer.view().await, ViewerView::Hidden);
    assert_eq!(deps.object_urls.live_count(), 0);
    assert_eq!(deps.object_urls.acquired_total(), 1);
    assert_eq!(deps.object_urls.released_total(), 1);
}

#[tokio::test]
async fn viewer_notifies_localized_message_on_missing_document() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/docs/gone.pdf")
        .with_status(404)
        .create_async()
        .await;
    let downloads = TempDir::new().unwrap();
    let mut deps = wire_dependencies(&config(server.url(), &downloads, "fr")).unwrap();

    deps.viewer
        .open(DocumentReference::from_url("/docs/gone.pdf", "Bail"))
        .await;

    assert_eq!(deps.viewer.view().await, ViewerView::Hidden);
    let notification = deps.notifications.recv().await.expect("notification");
    assert_eq!(notification.message, "Document introuvable");
    assert!(deps.notifications.try_recv().is_err());
    assert_eq!(deps.object_urls.acquired_total(), 0);
}

#[tokio::test]
async fn invoice_download_writes_localized_filename() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/documents/invoice/6123abc/202401")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.7 invoice")
        .create_async()
        .await;
    let downloads = TempDir::new().unwrap();
    let deps = wire_dependencies(&config(server.url(), &downloads, "fr")).unwrap();

    let path = deps
        .invoices
        .execute(&TenantRef::new("6123abc", "Acme Corp"), "202401")
        .await
        .expect("invoice saved");

    mock.assert_async().await;
    assert_eq!(path, downloads.path().join("Acme Corp-202401-facture.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 invoice");
}
