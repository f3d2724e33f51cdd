//! HTTP adapter for [`DocumentFetchPort`].
//!
//! Issues authenticated `GET` requests against the documents API and always
//! reads the response body as bytes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use mre_core::config::ApiConfig;
use mre_core::document::DEFAULT_CONTENT_TYPE;
use mre_core::ports::{DocumentFetchPort, FetchError};
use mre_core::{DocumentLocator, DocumentPayload, DocumentReference};

/// Binary content types, PDF first.
const BINARY_ACCEPT: &str = "application/pdf, application/octet-stream;q=0.9, */*;q=0.8";

#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("invalid api base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

pub struct HttpDocumentClient {
    client: Client,
    base_url: Url,
    documents_path: String,
    access_token: Option<String>,
}

impl HttpDocumentClient {
    /// Builds a client for the API described by `config`.
    ///
    /// Timeouts stay at the reqwest defaults unless `timeout_secs` is set.
    pub fn new(config: &ApiConfig) -> Result<Self, HttpClientError> {
        let base_url =
            Url::parse(config.base_url.trim()).map_err(|err| HttpClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: err.to_string(),
            })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            documents_path: config.documents_path.clone(),
            access_token: config
                .access_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
        })
    }

    /// Full request URL for `reference`.
    ///
    /// Absolute `http(s)` URLs are used as they are; other URL locators are
    /// appended to the base URL, keeping its path prefix. Composite keys are
    /// pushed as percent-encoded path segments after `documents_path`.
    pub fn request_url(&self, reference: &DocumentReference) -> Result<Url, FetchError> {
        if !reference.is_usable() {
            return Err(FetchError::InvalidReference);
        }

        match reference.locator() {
            DocumentLocator::Url(_) => self.join_locator_url(reference),
            DocumentLocator::Composite {
                resource_type,
                owner_id,
                term,
            } => {
                let mut url = self.base_url.clone();
                url.path_segments_mut()
                    .map_err(|()| {
                        warn!(base_url = %self.base_url, "api base url cannot carry a path");
                        FetchError::InvalidReference
                    })?
                    .pop_if_empty()
                    .extend(self.documents_path.split('/').filter(|s| !s.is_empty()))
                    .extend([resource_type.trim(), owner_id.trim(), term.trim()]);
                Ok(url)
            }
        }
    }

    fn join_locator_url(&self, reference: &DocumentReference) -> Result<Url, FetchError> {
        let path = reference.locator().request_path(&self.documents_path);
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path
        } else {
            format!(
                "{}/{}",
                self.base_url.as_str().trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        Url::parse(&raw).map_err(|err| {
            warn!(url = %raw, error = %err, "document url does not parse");
            FetchError::InvalidReference
        })
    }
}

fn status_error(status: StatusCode, url: &Url) -> FetchError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE | StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
            FetchError::NotFound(format!("{url} ({status})"))
        }
        _ => FetchError::Transport(format!("unexpected status {status} for {url}")),
    }
}

#[async_trait]
impl DocumentFetchPort for HttpDocumentClient {
    async fn fetch_document(
        &self,
        reference: &DocumentReference,
    ) -> Result<DocumentPayload, FetchError> {
        let url = self.request_url(reference)?;
        debug!(url = %url, "fetching document");

        let mut request = self.client.get(url.clone()).header(ACCEPT, BINARY_ACCEPT);
        if let Some(token) = &self.access_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &url));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        debug!(url = %url, size = bytes.len(), content_type = %content_type, "document downloaded");

        Ok(DocumentPayload::new(bytes, content_type))
    }
}
