//! Reqwest implementation of the backend trait.

use crate::config::BackendConfig;
use crate::dto::{
    AskRequest, AskResponse, DriveLinkRequest, HistoryResponse, ListDocumentsResponse,
    UploadResponse,
};
use async_trait::async_trait;
use docquery_core::backend::{AskReply, DocumentBackend};
use docquery_core::conversation::ConversationTurn;
use docquery_core::document::Document;
use docquery_core::error::{DocqueryError, Result};
use docquery_core::upload::LocalFile;
use reqwest::{Client, Response, StatusCode};

/// HTTP client for the document backend.
///
/// One instance per base URL; cheap to clone. Only the ask endpoint gets
/// the rate-limit classification, everything else maps non-2xx to a
/// transport error carrying the status and the response body.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Uses a caller-provided reqwest client (shared pools, proxies).
    pub fn with_client(client: Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Maps a received non-2xx response to a transport error.
    async fn failure(response: Response) -> DocqueryError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        DocqueryError::transport_status(status, body)
    }
}

fn send_error(err: reqwest::Error) -> DocqueryError {
    DocqueryError::transport(format!("Request failed: {}", err))
}

fn decode_error(err: reqwest::Error) -> DocqueryError {
    DocqueryError::transport(format!("Failed to parse response: {}", err))
}

/// 429 is the distinguished rate-limit outcome, but only on the ask
/// endpoint.
fn classify_ask_failure(status: StatusCode, body: String) -> DocqueryError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        DocqueryError::RateLimited
    } else {
        DocqueryError::transport_status(status.as_u16(), body)
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        let url = self.url("/api/files");
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(send_error)?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let body: ListDocumentsResponse = response.json().await.map_err(decode_error)?;
        Ok(body.documents.into_iter().map(Into::into).collect())
    }

    async fn upload_files(&self, files: &[LocalFile]) -> Result<Document> {
        let url = self.url("/api/files/upload");
        tracing::debug!("POST {} ({} files)", url, files.len());

        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part =
                reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(send_error)?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let body: UploadResponse = response.json().await.map_err(decode_error)?;
        Ok(body.document.into())
    }

    async fn upload_drive_link(&self, link: &str) -> Result<Document> {
        let url = self.url("/api/files/upload-drive-link");
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&DriveLinkRequest { link })
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(send_error)?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let body: UploadResponse = response.json().await.map_err(decode_error)?;
        Ok(body.document.into())
    }

    async fn fetch_history(&self, document_id: &str) -> Result<Vec<ConversationTurn>> {
        let url = self.url(&format!("/api/files/{}/history", document_id));
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(send_error)?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let body: HistoryResponse = response.json().await.map_err(decode_error)?;
        Ok(body
            .history
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn ask(&self, document_id: &str, question: &str) -> Result<AskReply> {
        let url = self.url("/api/qa/ask");
        tracing::debug!("POST {} for document {}", url, document_id);

        let response = self
            .client
            .post(&url)
            .json(&AskRequest {
                document_id,
                question,
            })
            .timeout(self.config.ask_timeout)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_ask_failure(status, body));
        }

        let body: AskResponse = response.json().await.map_err(decode_error)?;
        Ok(body.into())
    }
}
