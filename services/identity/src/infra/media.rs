use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::domain::repository::MediaStorePort;
use crate::error::IdentityServiceError;

/// HTTP client for the media upload collaborator.
///
/// The collaborator ingests a staged upload reference and answers with the
/// durable URL of the stored object. A non-success response means it could
/// not produce one — surfaced as `None`, the caller decides severity.
#[derive(Clone)]
pub struct HttpMediaStore {
    pub client: reqwest::Client,
    pub upload_url: String,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    source: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: Option<String>,
}

impl MediaStorePort for HttpMediaStore {
    async fn upload(&self, source: &str) -> Result<Option<String>, IdentityServiceError> {
        let response = self
            .client
            .post(&self.upload_url)
            .json(&UploadRequest { source })
            .send()
            .await
            .context("media upload request")?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: UploadResponse = response
            .json()
            .await
            .context("decode media upload response")?;
        Ok(body.url)
    }
}
