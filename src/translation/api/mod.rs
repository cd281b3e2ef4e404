//! Translation service client.
//!
//! This module defines the `TranslationService` trait covering the four remote
//! capabilities (text, image OCR, PDF, speech) plus the payload types they
//! exchange. The production HTTP implementation lives in `http`; tests
//! substitute scripted doubles at this seam.

mod http;

pub use http::RemoteService;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::{SpokenLanguage, TargetLanguage};

/// A file selected for upload, held in memory until dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original file name, used for the multipart part and MIME tagging
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Response from the text translation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextTranslation {
    pub translated_text: String,
}

/// Response from the image and PDF endpoints: the text the service extracted
/// from the document, paired with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentTranslation {
    pub extracted_text: String,
    pub translated_text: String,
}

/// Response from the speech endpoint: what the recognizer heard, paired with
/// its translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeechTranslation {
    pub recognized_text: String,
    pub translated_text: String,
}

/// Failures crossing the service boundary.
///
/// Callers treat all variants the same way (one generic message per
/// modality); the distinction exists for logging.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request never completed: connect failure, timeout, or other transport error
    #[error("{0}")]
    Network(String),
    /// Service answered with a non-success status
    #[error("translation service returned status {0}")]
    Status(u16),
    /// Service answered 2xx but the body did not parse
    #[error("{0}")]
    Malformed(String),
}

/// Client interface to the remote translation service.
///
/// Object safe so orchestration code can hold `Arc<dyn TranslationService>`
/// and tests can swap in doubles.
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translates plain text into the target language.
    async fn translate_text(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<TextTranslation, ServiceError>;

    /// Extracts text from an image and translates it.
    async fn translate_image(
        &self,
        image: &FileUpload,
        target: TargetLanguage,
    ) -> Result<DocumentTranslation, ServiceError>;

    /// Extracts text from a PDF and translates it.
    async fn translate_pdf(
        &self,
        pdf: &FileUpload,
        target: TargetLanguage,
    ) -> Result<DocumentTranslation, ServiceError>;

    /// Recognizes speech in a WAV clip and translates the transcript.
    async fn translate_speech(
        &self,
        audio: &FileUpload,
        target: TargetLanguage,
        spoken: SpokenLanguage,
    ) -> Result<SpeechTranslation, ServiceError>;
}

#[cfg(test)]
pub mod testing {
    //! Scripted service double for orchestration tests.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Service double returning pre-scripted responses in order.
    ///
    /// Each endpoint pops its next scripted result per call and panics when
    /// called more times than scripted. An optional gate holds every call
    /// until the test releases it, to keep a request observably in flight.
    #[derive(Default)]
    pub struct MockService {
        text: Mutex<VecDeque<Result<TextTranslation, ServiceError>>>,
        image: Mutex<VecDeque<Result<DocumentTranslation, ServiceError>>>,
        pdf: Mutex<VecDeque<Result<DocumentTranslation, ServiceError>>>,
        speech: Mutex<VecDeque<Result<SpeechTranslation, ServiceError>>>,
        gate: Mutex<Option<Arc<Notify>>>,
        text_calls: AtomicUsize,
        image_calls: AtomicUsize,
        pdf_calls: AtomicUsize,
        speech_calls: AtomicUsize,
    }

    impl MockService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text(self, result: Result<TextTranslation, ServiceError>) -> Self {
            self.text.lock().unwrap().push_back(result);
            self
        }

        pub fn with_image(self, result: Result<DocumentTranslation, ServiceError>) -> Self {
            self.image.lock().unwrap().push_back(result);
            self
        }

        pub fn with_pdf(self, result: Result<DocumentTranslation, ServiceError>) -> Self {
            self.pdf.lock().unwrap().push_back(result);
            self
        }

        pub fn with_speech(self, result: Result<SpeechTranslation, ServiceError>) -> Self {
            self.speech.lock().unwrap().push_back(result);
            self
        }

        /// Holds every subsequent call until the returned handle is notified.
        pub fn gated(self) -> (Self, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(gate.clone());
            (self, gate)
        }

        pub fn text_calls(&self) -> usize {
            self.text_calls.load(Ordering::SeqCst)
        }

        pub fn image_calls(&self) -> usize {
            self.image_calls.load(Ordering::SeqCst)
        }

        pub fn pdf_calls(&self) -> usize {
            self.pdf_calls.load(Ordering::SeqCst)
        }

        pub fn speech_calls(&self) -> usize {
            self.speech_calls.load(Ordering::SeqCst)
        }

        pub fn total_calls(&self) -> usize {
            self.text_calls() + self.image_calls() + self.pdf_calls() + self.speech_calls()
        }

        async fn wait_for_gate(&self) {
            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl TranslationService for MockService {
        async fn translate_text(
            &self,
            _text: &str,
            _target: TargetLanguage,
        ) -> Result<TextTranslation, ServiceError> {
            self.text_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;
            self.text
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted translate_text call")
        }

        async fn translate_image(
            &self,
            _image: &FileUpload,
            _target: TargetLanguage,
        ) -> Result<DocumentTranslation, ServiceError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;
            self.image
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted translate_image call")
        }

        async fn translate_pdf(
            &self,
            _pdf: &FileUpload,
            _target: TargetLanguage,
        ) -> Result<DocumentTranslation, ServiceError> {
            self.pdf_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;
            self.pdf
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted translate_pdf call")
        }

        async fn translate_speech(
            &self,
            _audio: &FileUpload,
            _target: TargetLanguage,
            _spoken: SpokenLanguage,
        ) -> Result<SpeechTranslation, ServiceError> {
            self.speech_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;
            self.speech
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted translate_speech call")
        }
    }

    #[test]
    fn test_service_is_object_safe() {
        fn assert_object_safe(_service: &dyn TranslationService) {}
        let mock = MockService::new();
        assert_object_safe(&mock);
    }
}
