//! Remote image hosting client.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::error::ImageStoreError;
use super::{DeleteOutcome, ImageStore, UploadedImage};

/// Client for a remote image-hosting API.
///
/// The API is expected to accept a multipart upload at `POST {base}/upload`
/// returning `{secure_url, public_id}`, and a deletion at
/// `POST {base}/destroy` returning `{result}` where `"ok"` confirms removal.
pub struct HttpImageStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

impl HttpImageStore {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build a POST request with auth headers.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("accept", "application/json")
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(&self, path: &Path) -> Result<UploadedImage, ImageStoreError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ImageStoreError::InvalidPath(path.display().to_string()))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .build_request(&self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ImageStoreError::Api { status, message });
        }

        let body: UploadResponse = response.json().await?;
        Ok(UploadedImage {
            url: body.secure_url,
            deletion_handle: body.public_id,
        })
    }

    async fn destroy(&self, handle: &str) -> Result<DeleteOutcome, ImageStoreError> {
        let response = self
            .build_request(&self.endpoint("destroy"))
            .json(&serde_json::json!({ "public_id": handle }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ImageStoreError::Api { status, message });
        }

        let body: DestroyResponse = response.json().await?;
        if body.result == "ok" {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotConfirmed(body.result))
        }
    }
}
