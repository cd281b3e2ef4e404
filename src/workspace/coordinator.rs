//! Modality request coordinators.
//!
//! A [`Workspace`] owns the per-modality sessions, the shared operation
//! state, the language preference and a handle to the translation service.
//! Every remote dispatch follows the same shape: validate input, acquire
//! the dispatch permit, release all locks, await the service, settle. The
//! session lock is never held across an `.await`.
//!
//! The slot a response lands in is bound when the request is dispatched,
//! not when it settles, so switching the active modality while a request
//! is in flight never misroutes its result.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::recording::AudioClip;
use crate::translation::{
    DocumentTranslation, FileUpload, LanguagePreference, SpeechTranslation, SpokenLanguage,
    TargetLanguage, TranslationService,
};

use super::operation::{DispatchError, SharedOperation};
use super::session::{ImageSession, Modality, PdfSession, SpeechSession, TextSession};

/// Where a text-endpoint response is written, decided at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextDestination {
    /// The text session's translation slot
    Text,
    /// The speech session's translation slot (re-translation of a transcript)
    Speech,
}

/// Session state behind the workspace lock.
#[derive(Debug, Default)]
pub struct WorkspaceState {
    pub active: Modality,
    pub languages: LanguagePreference,
    pub text: TextSession,
    pub image: ImageSession,
    pub pdf: PdfSession,
    pub speech: SpeechSession,
}

/// Client-side orchestrator for one translation session.
///
/// Cheap to clone; clones share the same sessions and operation state.
#[derive(Clone)]
pub struct Workspace {
    service: Arc<dyn TranslationService>,
    operation: SharedOperation,
    state: Arc<Mutex<WorkspaceState>>,
}

impl Workspace {
    pub fn new(service: Arc<dyn TranslationService>, languages: LanguagePreference) -> Self {
        let state = WorkspaceState {
            languages,
            ..WorkspaceState::default()
        };
        Self {
            service,
            operation: SharedOperation::new(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn operation(&self) -> &SharedOperation {
        &self.operation
    }

    /// Last failure message, if the most recent action failed.
    pub fn error(&self) -> Option<String> {
        self.operation.error()
    }

    /// Switches the active modality. In-flight work is never cancelled;
    /// a late settlement writes the slot bound at its dispatch.
    pub fn set_active(&self, modality: Modality) {
        let mut state = self.state.lock().unwrap();
        if state.active != modality {
            tracing::debug!("Active modality: {}", modality.label());
            state.active = modality;
        }
    }

    pub fn active(&self) -> Modality {
        self.state.lock().unwrap().active
    }

    pub fn languages(&self) -> LanguagePreference {
        self.state.lock().unwrap().languages
    }

    pub fn set_target_language(&self, target: TargetLanguage) {
        self.state.lock().unwrap().languages.target = target;
    }

    pub fn set_spoken_language(&self, spoken: SpokenLanguage) {
        self.state.lock().unwrap().languages.spoken = spoken;
    }

    pub fn set_text_input(&self, input: impl Into<String>) {
        self.state.lock().unwrap().text.input = input.into();
    }

    pub fn text_translation(&self) -> Option<String> {
        self.state.lock().unwrap().text.translation.clone()
    }

    /// Selects an image for OCR translation and returns the regenerated
    /// preview path. Any previous result is cleared.
    ///
    /// # Errors
    /// - If the preview copy cannot be written
    pub fn select_image(&self, file: FileUpload) -> std::io::Result<PathBuf> {
        let mut state = self.state.lock().unwrap();
        let path = state.image.select(file)?.to_path_buf();
        tracing::debug!("Image selected, preview at {}", path.display());
        Ok(path)
    }

    pub fn image_result(&self) -> Option<DocumentTranslation> {
        self.state.lock().unwrap().image.result.clone()
    }

    /// Selects a PDF for translation, clearing any previous result.
    pub fn select_pdf(&self, file: FileUpload) {
        self.state.lock().unwrap().pdf.select(file);
    }

    pub fn pdf_result(&self) -> Option<DocumentTranslation> {
        self.state.lock().unwrap().pdf.result.clone()
    }

    pub fn is_recording(&self) -> bool {
        self.state.lock().unwrap().speech.recording
    }

    pub fn recognized_text(&self) -> Option<String> {
        self.state.lock().unwrap().speech.recognized_text().map(str::to_string)
    }

    pub fn speech_translation(&self) -> Option<String> {
        self.state.lock().unwrap().speech.translation().map(str::to_string)
    }

    /// Translates the text session's input into the current target language.
    ///
    /// # Errors
    /// - [`DispatchError::Invalid`] when the input is empty (nothing is sent)
    /// - [`DispatchError::Busy`] while another request is in flight
    /// - [`DispatchError::Failed`] when the dispatched request fails
    pub async fn translate_text(&self) -> Result<String, DispatchError> {
        let (input, target) = {
            let state = self.state.lock().unwrap();
            (state.text.input.clone(), state.languages.target)
        };
        if input.trim().is_empty() {
            return Err(DispatchError::Invalid("Enter text to translate"));
        }

        self.dispatch_text(&input, target, TextDestination::Text).await
    }

    /// Re-translates the recognized transcript into the current target
    /// language. Only the speech translation slot is replaced, regardless
    /// of which modality is active when the response lands.
    ///
    /// # Errors
    /// - [`DispatchError::Invalid`] when no transcript exists yet
    /// - [`DispatchError::Busy`] while another request is in flight
    /// - [`DispatchError::Failed`] when the dispatched request fails
    pub async fn retranslate_speech(&self) -> Result<String, DispatchError> {
        let (recognized, target) = {
            let state = self.state.lock().unwrap();
            (
                state.speech.recognized_text().map(str::to_string),
                state.languages.target,
            )
        };
        let recognized = match recognized {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(DispatchError::Invalid("No recognized speech to translate")),
        };

        self.dispatch_text(&recognized, target, TextDestination::Speech).await
    }

    /// Shared text-endpoint dispatch. The destination slot is fixed here,
    /// before the request leaves.
    async fn dispatch_text(
        &self,
        text: &str,
        target: TargetLanguage,
        destination: TextDestination,
    ) -> Result<String, DispatchError> {
        let permit = self.operation.begin()?;
        tracing::info!(
            "Translating text (<{} chars>) to {}",
            text.chars().count(),
            target.code()
        );

        match self.service.translate_text(text, target).await {
            Ok(response) => {
                let translation = response.translated_text;
                {
                    let mut state = self.state.lock().unwrap();
                    match destination {
                        TextDestination::Text => {
                            state.text.translation = Some(translation.clone());
                        }
                        TextDestination::Speech => {
                            state.speech.set_translation(translation.clone());
                        }
                    }
                }
                permit.succeed();
                Ok(translation)
            }
            Err(e) => {
                tracing::error!("Text translation failed: {e}");
                let message = Modality::Text.failure_message();
                permit.fail(message);
                Err(DispatchError::Failed(message.to_string()))
            }
        }
    }

    /// Sends the selected image for OCR translation.
    ///
    /// On success the whole result is stored at once; on failure the
    /// previous result and selection are left untouched.
    ///
    /// # Errors
    /// - [`DispatchError::Invalid`] when no image is selected
    /// - [`DispatchError::Busy`] while another request is in flight
    /// - [`DispatchError::Failed`] when the dispatched request fails
    pub async fn translate_image(&self) -> Result<DocumentTranslation, DispatchError> {
        let (file, target) = {
            let state = self.state.lock().unwrap();
            (state.image.file.clone(), state.languages.target)
        };
        let Some(file) = file else {
            return Err(DispatchError::Invalid("Select an image to translate"));
        };

        let permit = self.operation.begin()?;
        tracing::info!(
            "Translating image {} ({} bytes) to {}",
            file.name,
            file.bytes.len(),
            target.code()
        );

        match self.service.translate_image(&file, target).await {
            Ok(result) => {
                self.state.lock().unwrap().image.result = Some(result.clone());
                permit.succeed();
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Image translation failed: {e}");
                let message = Modality::Image.failure_message();
                permit.fail(message);
                Err(DispatchError::Failed(message.to_string()))
            }
        }
    }

    /// Sends the selected PDF for translation.
    ///
    /// Same settlement rules as [`translate_image`](Self::translate_image).
    ///
    /// # Errors
    /// - [`DispatchError::Invalid`] when no document is selected
    /// - [`DispatchError::Busy`] while another request is in flight
    /// - [`DispatchError::Failed`] when the dispatched request fails
    pub async fn translate_pdf(&self) -> Result<DocumentTranslation, DispatchError> {
        let (file, target) = {
            let state = self.state.lock().unwrap();
            (state.pdf.file.clone(), state.languages.target)
        };
        let Some(file) = file else {
            return Err(DispatchError::Invalid("Select a PDF to translate"));
        };

        let permit = self.operation.begin()?;
        tracing::info!(
            "Translating PDF {} ({} bytes) to {}",
            file.name,
            file.bytes.len(),
            target.code()
        );

        match self.service.translate_pdf(&file, target).await {
            Ok(result) => {
                self.state.lock().unwrap().pdf.result = Some(result.clone());
                permit.succeed();
                Ok(result)
            }
            Err(e) => {
                tracing::error!("PDF translation failed: {e}");
                let message = Modality::Pdf.failure_message();
                permit.fail(message);
                Err(DispatchError::Failed(message.to_string()))
            }
        }
    }

    /// Marks a recording cycle started: clears the transcript slots and any
    /// previous error so stale results never show while capturing.
    ///
    /// The capture device itself is driven by the caller; this only guards
    /// and prepares the session.
    ///
    /// # Errors
    /// - [`DispatchError::Busy`] while a request is in flight
    pub fn begin_recording(&self) -> Result<(), DispatchError> {
        if self.operation.is_busy() {
            return Err(DispatchError::Busy);
        }
        self.operation.clear_error();

        let mut state = self.state.lock().unwrap();
        state.speech.reset_for_recording();
        state.speech.recording = true;
        tracing::debug!("Recording cycle started");
        Ok(())
    }

    /// Records a capture failure: the recording flag drops and the message
    /// lands in the shared error slot. Nothing is dispatched.
    pub fn recording_failed(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("Recording failed: {message}");
        self.state.lock().unwrap().speech.recording = false;
        self.operation.set_error(message);
    }

    /// Completes a recording cycle. With a clip, dispatches recognition and
    /// translation; with `None` (nothing captured) it settles quietly.
    ///
    /// The clip is consumed, so one recording dispatches at most once.
    ///
    /// # Errors
    /// - [`DispatchError::Busy`] while another request is in flight
    /// - [`DispatchError::Failed`] when the dispatched request fails
    pub async fn finish_recording(
        &self,
        clip: Option<AudioClip>,
    ) -> Result<Option<SpeechTranslation>, DispatchError> {
        self.state.lock().unwrap().speech.recording = false;

        let Some(clip) = clip else {
            tracing::debug!("Recording finished with no audio to dispatch");
            return Ok(None);
        };

        self.recognize_and_translate(clip).await.map(Some)
    }

    /// Sends a finalized clip for speech recognition and translation. On
    /// success the transcript and its translation are written together.
    async fn recognize_and_translate(
        &self,
        clip: AudioClip,
    ) -> Result<SpeechTranslation, DispatchError> {
        let (target, spoken) = {
            let state = self.state.lock().unwrap();
            (state.languages.target, state.languages.spoken)
        };

        let permit = self.operation.begin()?;
        tracing::info!(
            "Recognizing {:.2}s clip (spoken {}, target {})",
            clip.duration_secs(),
            spoken.code(),
            target.code()
        );

        let upload = FileUpload::new(AudioClip::FILE_NAME, clip.into_bytes());
        match self.service.translate_speech(&upload, target, spoken).await {
            Ok(result) => {
                self.state.lock().unwrap().speech.set_recognition(
                    result.recognized_text.clone(),
                    result.translated_text.clone(),
                );
                permit.succeed();
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Speech translation failed: {e}");
                let message = Modality::Speech.failure_message();
                permit.fail(message);
                Err(DispatchError::Failed(message.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::api::testing::MockService;
    use crate::translation::{ServiceError, TextTranslation};

    fn workspace(mock: MockService) -> (Workspace, Arc<MockService>) {
        let service = Arc::new(mock);
        let ws = Workspace::new(service.clone(), LanguagePreference::default());
        (ws, service)
    }

    fn text_ok(translated: &str) -> Result<TextTranslation, ServiceError> {
        Ok(TextTranslation {
            translated_text: translated.to_string(),
        })
    }

    fn document_ok(extracted: &str, translated: &str) -> Result<DocumentTranslation, ServiceError> {
        Ok(DocumentTranslation {
            extracted_text: extracted.to_string(),
            translated_text: translated.to_string(),
        })
    }

    fn speech_ok(recognized: &str, translated: &str) -> Result<SpeechTranslation, ServiceError> {
        Ok(SpeechTranslation {
            recognized_text: recognized.to_string(),
            translated_text: translated.to_string(),
        })
    }

    fn network_err<T>() -> Result<T, ServiceError> {
        Err(ServiceError::Network("connection refused".to_string()))
    }

    fn test_clip() -> AudioClip {
        AudioClip::from_samples(&[0i16; 1600], 16000).unwrap()
    }

    /// Yields until the mock has seen `calls` requests, so a spawned
    /// dispatch is observably in flight before the test proceeds.
    async fn wait_for_calls(mock: &MockService, calls: usize) {
        for _ in 0..1000 {
            if mock.total_calls() >= calls {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("mock never reached {calls} calls");
    }

    #[tokio::test]
    async fn test_translate_text_success() {
        let (ws, mock) = workspace(MockService::new().with_text(text_ok("Bonjour")));
        ws.set_text_input("Hello");
        ws.set_target_language(TargetLanguage::French);

        let translation = ws.translate_text().await.unwrap();

        assert_eq!(translation, "Bonjour");
        assert_eq!(ws.text_translation().as_deref(), Some("Bonjour"));
        assert!(!ws.operation().is_busy());
        assert_eq!(ws.error(), None);
        assert_eq!(mock.text_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_never_dispatches() {
        let (ws, mock) = workspace(MockService::new());
        ws.set_text_input("   ");

        let err = ws.translate_text().await.unwrap_err();

        assert_eq!(err, DispatchError::Invalid("Enter text to translate"));
        assert_eq!(mock.total_calls(), 0);
        assert!(!ws.operation().is_busy());
        assert_eq!(ws.error(), None);
    }

    #[tokio::test]
    async fn test_text_failure_keeps_previous_translation() {
        let (ws, _mock) = workspace(
            MockService::new()
                .with_text(text_ok("Bonjour"))
                .with_text(network_err()),
        );
        ws.set_text_input("Hello");
        ws.translate_text().await.unwrap();

        let err = ws.translate_text().await.unwrap_err();

        assert_eq!(
            err,
            DispatchError::Failed("Translation failed. Please try again.".to_string())
        );
        assert_eq!(ws.text_translation().as_deref(), Some("Bonjour"));
        assert_eq!(
            ws.error().as_deref(),
            Some("Translation failed. Please try again.")
        );
        assert!(!ws.operation().is_busy());
    }

    #[tokio::test]
    async fn test_next_dispatch_clears_previous_error() {
        let (ws, _mock) = workspace(
            MockService::new()
                .with_text(network_err())
                .with_text(text_ok("Bonjour")),
        );
        ws.set_text_input("Hello");

        ws.translate_text().await.unwrap_err();
        assert!(ws.error().is_some());

        ws.translate_text().await.unwrap();
        assert_eq!(ws.error(), None);
    }

    #[tokio::test]
    async fn test_second_dispatch_rejected_while_in_flight() {
        let (mock, gate) = MockService::new().with_text(text_ok("Bonjour")).gated();
        let (ws, mock) = workspace(mock);
        ws.set_text_input("Hello");

        let in_flight = tokio::spawn({
            let ws = ws.clone();
            async move { ws.translate_text().await }
        });
        wait_for_calls(&mock, 1).await;

        assert!(ws.operation().is_busy());
        assert_eq!(ws.translate_text().await.unwrap_err(), DispatchError::Busy);
        assert_eq!(ws.error(), None);
        assert_eq!(mock.text_calls(), 1);

        gate.notify_one();
        in_flight.await.unwrap().unwrap();
        assert!(!ws.operation().is_busy());
        assert_eq!(ws.text_translation().as_deref(), Some("Bonjour"));
    }

    #[tokio::test]
    async fn test_image_requires_selection() {
        let (ws, mock) = workspace(MockService::new());

        let err = ws.translate_image().await.unwrap_err();

        assert_eq!(err, DispatchError::Invalid("Select an image to translate"));
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_image_success_stores_whole_result() {
        let (ws, _mock) = workspace(
            MockService::new().with_image(document_ok("Hello world", "Bonjour le monde")),
        );
        let preview = ws
            .select_image(FileUpload::new("sign.png", vec![1, 2, 3]))
            .unwrap();
        assert!(preview.exists());

        let result = ws.translate_image().await.unwrap();

        assert_eq!(result.extracted_text, "Hello world");
        assert_eq!(result.translated_text, "Bonjour le monde");
        assert_eq!(ws.image_result(), Some(result));
        assert_eq!(ws.error(), None);
    }

    #[tokio::test]
    async fn test_image_failure_preserves_previous_result() {
        let (ws, _mock) = workspace(
            MockService::new()
                .with_image(document_ok("Hello", "Bonjour"))
                .with_image(Err(ServiceError::Status(500))),
        );
        ws.select_image(FileUpload::new("sign.png", vec![1])).unwrap();
        let first = ws.translate_image().await.unwrap();

        let err = ws.translate_image().await.unwrap_err();

        assert_eq!(
            err,
            DispatchError::Failed("Image translation failed. Please try again.".to_string())
        );
        assert_eq!(ws.image_result(), Some(first));
        assert_eq!(
            ws.error().as_deref(),
            Some("Image translation failed. Please try again.")
        );
        assert!(!ws.operation().is_busy());
    }

    #[tokio::test]
    async fn test_selecting_new_image_clears_result() {
        let (ws, _mock) =
            workspace(MockService::new().with_image(document_ok("Hello", "Bonjour")));
        ws.select_image(FileUpload::new("first.png", vec![1])).unwrap();
        ws.translate_image().await.unwrap();
        assert!(ws.image_result().is_some());

        ws.select_image(FileUpload::new("second.png", vec![2])).unwrap();
        assert_eq!(ws.image_result(), None);
    }

    #[tokio::test]
    async fn test_pdf_success_and_failure() {
        let (ws, mock) = workspace(
            MockService::new()
                .with_pdf(document_ok("Report text", "Texte du rapport"))
                .with_pdf(network_err()),
        );
        ws.select_pdf(FileUpload::new("report.pdf", vec![1, 2]));

        let result = ws.translate_pdf().await.unwrap();
        assert_eq!(result.translated_text, "Texte du rapport");
        assert_eq!(ws.pdf_result(), Some(result.clone()));

        let err = ws.translate_pdf().await.unwrap_err();
        assert_eq!(
            err,
            DispatchError::Failed("PDF translation failed. Please try again.".to_string())
        );
        assert_eq!(ws.pdf_result(), Some(result));
        assert_eq!(mock.pdf_calls(), 2);
    }

    #[tokio::test]
    async fn test_begin_recording_clears_transcripts_and_error() {
        let (ws, _mock) = workspace(
            MockService::new()
                .with_speech(speech_ok("hello", "bonjour"))
                .with_text(network_err()),
        );
        ws.finish_recording(Some(test_clip())).await.unwrap();
        assert!(ws.recognized_text().is_some());

        ws.set_text_input("Hello");
        ws.translate_text().await.unwrap_err();
        assert!(ws.error().is_some());

        ws.begin_recording().unwrap();

        assert!(ws.is_recording());
        assert_eq!(ws.recognized_text(), None);
        assert_eq!(ws.speech_translation(), None);
        assert_eq!(ws.error(), None);
    }

    #[tokio::test]
    async fn test_begin_recording_rejected_while_busy() {
        let (mock, gate) = MockService::new().with_text(text_ok("Bonjour")).gated();
        let (ws, mock) = workspace(mock);
        ws.set_text_input("Hello");

        let in_flight = tokio::spawn({
            let ws = ws.clone();
            async move { ws.translate_text().await }
        });
        wait_for_calls(&mock, 1).await;

        assert_eq!(ws.begin_recording().unwrap_err(), DispatchError::Busy);
        assert!(!ws.is_recording());

        gate.notify_one();
        in_flight.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_finish_recording_without_clip_dispatches_nothing() {
        let (ws, mock) = workspace(MockService::new());
        ws.begin_recording().unwrap();

        let result = ws.finish_recording(None).await.unwrap();

        assert_eq!(result, None);
        assert!(!ws.is_recording());
        assert_eq!(mock.total_calls(), 0);
        assert_eq!(ws.error(), None);
    }

    #[tokio::test]
    async fn test_speech_success_writes_pair_together() {
        let (ws, _mock) =
            workspace(MockService::new().with_speech(speech_ok("good morning", "bonjour")));
        ws.begin_recording().unwrap();

        let result = ws.finish_recording(Some(test_clip())).await.unwrap();

        assert!(result.is_some());
        assert_eq!(ws.recognized_text().as_deref(), Some("good morning"));
        assert_eq!(ws.speech_translation().as_deref(), Some("bonjour"));
        assert!(!ws.is_recording());
        assert!(!ws.operation().is_busy());
    }

    #[tokio::test]
    async fn test_speech_failure_sets_generic_message() {
        let (ws, _mock) = workspace(MockService::new().with_speech(Err(ServiceError::Status(500))));
        ws.begin_recording().unwrap();

        let err = ws.finish_recording(Some(test_clip())).await.unwrap_err();

        assert_eq!(
            err,
            DispatchError::Failed("Speech recognition failed. Please try again.".to_string())
        );
        assert_eq!(ws.recognized_text(), None);
        assert_eq!(ws.speech_translation(), None);
        assert!(!ws.is_recording());
        assert!(!ws.operation().is_busy());
    }

    #[tokio::test]
    async fn test_recording_failure_reported_without_dispatch() {
        let (ws, mock) = workspace(MockService::new());
        ws.begin_recording().unwrap();

        ws.recording_failed(
            "Microphone access denied. Please allow microphone access in your system settings.",
        );

        assert!(!ws.is_recording());
        assert_eq!(
            ws.error().as_deref(),
            Some("Microphone access denied. Please allow microphone access in your system settings.")
        );
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_retranslate_overwrites_only_translation() {
        let (ws, mock) = workspace(
            MockService::new()
                .with_speech(speech_ok("hello", "bonjour"))
                .with_text(text_ok("hola")),
        );
        ws.finish_recording(Some(test_clip())).await.unwrap();

        ws.set_target_language(TargetLanguage::Spanish);
        let translation = ws.retranslate_speech().await.unwrap();

        assert_eq!(translation, "hola");
        assert_eq!(ws.recognized_text().as_deref(), Some("hello"));
        assert_eq!(ws.speech_translation().as_deref(), Some("hola"));
        assert_eq!(mock.text_calls(), 1);
    }

    #[tokio::test]
    async fn test_retranslate_without_transcript_is_invalid() {
        let (ws, mock) = workspace(MockService::new());

        let err = ws.retranslate_speech().await.unwrap_err();

        assert_eq!(err, DispatchError::Invalid("No recognized speech to translate"));
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_retranslate_failure_uses_text_message() {
        let (ws, _mock) = workspace(
            MockService::new()
                .with_speech(speech_ok("hello", "bonjour"))
                .with_text(network_err()),
        );
        ws.finish_recording(Some(test_clip())).await.unwrap();

        let err = ws.retranslate_speech().await.unwrap_err();

        assert_eq!(
            err,
            DispatchError::Failed("Translation failed. Please try again.".to_string())
        );
        assert_eq!(ws.speech_translation().as_deref(), Some("bonjour"));
    }

    #[tokio::test]
    async fn test_destination_fixed_at_dispatch_survives_modality_switch() {
        let (mock, gate) = MockService::new()
            .with_speech(speech_ok("hello", "bonjour"))
            .with_text(text_ok("hola"))
            .gated();
        let (ws, mock) = workspace(mock);

        gate.notify_one();
        ws.finish_recording(Some(test_clip())).await.unwrap();
        ws.set_active(Modality::Speech);

        let in_flight = tokio::spawn({
            let ws = ws.clone();
            async move { ws.retranslate_speech().await }
        });
        wait_for_calls(&mock, 2).await;

        // Switch away and type into the text session while the
        // re-translation is still in flight.
        ws.set_active(Modality::Text);
        ws.set_text_input("unrelated draft");

        gate.notify_one();
        in_flight.await.unwrap().unwrap();

        assert_eq!(ws.speech_translation().as_deref(), Some("hola"));
        assert_eq!(ws.text_translation(), None);
        assert_eq!(ws.active(), Modality::Text);
    }

    #[tokio::test]
    async fn test_repeated_dispatch_overwrites_result() {
        let (ws, _mock) = workspace(
            MockService::new()
                .with_text(text_ok("Bonjour"))
                .with_text(text_ok("Salut")),
        );
        ws.set_text_input("Hello");

        ws.translate_text().await.unwrap();
        assert_eq!(ws.text_translation().as_deref(), Some("Bonjour"));

        ws.translate_text().await.unwrap();
        assert_eq!(ws.text_translation().as_deref(), Some("Salut"));
    }
}
