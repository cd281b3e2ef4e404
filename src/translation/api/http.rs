//! HTTP implementation of the translation service client.
//!
//! Sends requests to a running translation service over its REST API:
//! JSON for plain text, multipart form data for image, PDF and audio uploads.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use super::{
    DocumentTranslation, FileUpload, ServiceError, SpeechTranslation, TextTranslation,
    TranslationService,
};
use crate::translation::{SpokenLanguage, TargetLanguage};

/// Budget for establishing the TCP connection, separate from the
/// configurable whole-request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON body for the text translation endpoint.
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_language: &'a str,
}

/// Client for a translation service instance reachable over HTTP.
pub struct RemoteService {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteService {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    /// - If the underlying HTTP client cannot be constructed
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ServiceError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends a prepared request and maps transport failures and non-success
    /// statuses into `ServiceError`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let message = if e.is_connect() {
                    "Failed to connect to the translation service. Is it running?".to_string()
                } else if e.is_timeout() {
                    "Request to the translation service timed out.".to_string()
                } else {
                    format!("Translation service network error: {e}")
                };
                return Err(ServiceError::Network(message));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Translation service returned {status}: {error_body}");
            return Err(ServiceError::Status(status.as_u16()));
        }

        Ok(response)
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Malformed(format!("Failed to parse service response: {e}")))
    }

    fn file_part(upload: &FileUpload, mime: &str) -> Result<reqwest::multipart::Part, ServiceError> {
        reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.name.clone())
            .mime_str(mime)
            .map_err(|e| ServiceError::Network(format!("Failed to create file part for upload: {e}")))
    }
}

#[async_trait]
impl TranslationService for RemoteService {
    async fn translate_text(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<TextTranslation, ServiceError> {
        let url = self.endpoint("translate");
        tracing::debug!(
            "Translation API Call:\n  URL: {}\n  Method: POST\n  Body parameters: target_language={} text=<{} chars>",
            url,
            target.code(),
            text.chars().count()
        );

        let body = TranslateRequest {
            text,
            target_language: target.code(),
        };

        let response = self.send(self.client.post(&url).json(&body)).await?;
        Self::parse(response).await
    }

    async fn translate_image(
        &self,
        image: &FileUpload,
        target: TargetLanguage,
    ) -> Result<DocumentTranslation, ServiceError> {
        let url = self.endpoint("ocr-translate");
        tracing::debug!(
            "OCR API Call:\n  URL: {}\n  Method: POST\n  Body parameters: target_language={} image={} ({} bytes)",
            url,
            target.code(),
            image.name,
            image.bytes.len()
        );

        let part = Self::file_part(image, image_mime(&image.name))?;
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("target_language", target.code().to_string());

        let response = self.send(self.client.post(&url).multipart(form)).await?;
        Self::parse(response).await
    }

    async fn translate_pdf(
        &self,
        pdf: &FileUpload,
        target: TargetLanguage,
    ) -> Result<DocumentTranslation, ServiceError> {
        let url = self.endpoint("pdf-translate");
        tracing::debug!(
            "PDF API Call:\n  URL: {}\n  Method: POST\n  Body parameters: target_language={} pdf={} ({} bytes)",
            url,
            target.code(),
            pdf.name,
            pdf.bytes.len()
        );

        let part = Self::file_part(pdf, "application/pdf")?;
        let form = reqwest::multipart::Form::new()
            .part("pdf", part)
            .text("target_language", target.code().to_string());

        let response = self.send(self.client.post(&url).multipart(form)).await?;
        Self::parse(response).await
    }

    async fn translate_speech(
        &self,
        audio: &FileUpload,
        target: TargetLanguage,
        spoken: SpokenLanguage,
    ) -> Result<SpeechTranslation, ServiceError> {
        let url = self.endpoint("speech-translate");
        tracing::debug!(
            "Speech API Call:\n  URL: {}\n  Method: POST\n  Body parameters: target_language={} source_language={} audio={} ({} bytes)",
            url,
            target.code(),
            spoken.code(),
            audio.name,
            audio.bytes.len()
        );

        let part = Self::file_part(audio, "audio/wav")?;
        let form = reqwest::multipart::Form::new()
            .part("audio", part)
            .text("target_language", target.code().to_string())
            .text("source_language", spoken.code().to_string());

        let response = self.send(self.client.post(&url).multipart(form)).await?;
        Self::parse(response).await
    }
}

/// Guesses the MIME type for an image upload from its file extension.
///
/// Unknown extensions fall back to octet-stream; the service inspects the
/// bytes either way.
fn image_mime(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
