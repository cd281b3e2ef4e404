//! Per-modality session state.
//!
//! Each input modality keeps its own session: the pending input plus the
//! last settled result. Sessions live for the process and are only ever
//! replaced, never appended to, so a repeated action overwrites its
//! previous outcome.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::translation::{DocumentTranslation, FileUpload};

/// Input modalities the workspace switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modality {
    #[default]
    Text,
    Image,
    Pdf,
    Speech,
}

impl Modality {
    pub fn id(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Pdf => "pdf",
            Modality::Speech => "speech",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Modality::Text => "Text",
            Modality::Image => "Image",
            Modality::Pdf => "PDF",
            Modality::Speech => "Speech",
        }
    }

    /// Generic user-facing message when a request for this modality fails.
    ///
    /// Transport and service detail stays in the logs; the user sees one
    /// stable message per modality.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Modality::Text => "Translation failed. Please try again.",
            Modality::Image => "Image translation failed. Please try again.",
            Modality::Pdf => "PDF translation failed. Please try again.",
            Modality::Speech => "Speech recognition failed. Please try again.",
        }
    }
}

/// State of the text modality.
#[derive(Debug, Default)]
pub struct TextSession {
    pub input: String,
    pub translation: Option<String>,
}

/// Counter distinguishing preview files created by this process.
static PREVIEW_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A temp-dir copy of a selected image for the presentation layer to show.
///
/// The copy is removed when the preview is replaced or dropped.
#[derive(Debug)]
pub struct PreviewFile {
    path: PathBuf,
}

impl PreviewFile {
    fn create(name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("img");
        let file_name = format!(
            "lingo_preview_{}_{}.{}",
            std::process::id(),
            PREVIEW_COUNTER.fetch_add(1, Ordering::Relaxed),
            extension
        );
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PreviewFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::debug!("Failed to remove preview file {}: {}", self.path.display(), e);
        }
    }
}

/// State of the image modality.
#[derive(Debug, Default)]
pub struct ImageSession {
    pub file: Option<FileUpload>,
    pub preview: Option<PreviewFile>,
    pub result: Option<DocumentTranslation>,
}

impl ImageSession {
    /// Selects a new image: replaces the file, regenerates the preview and
    /// clears any previous result. The superseded preview file is removed.
    ///
    /// # Errors
    /// - If the preview copy cannot be written; the session is left unchanged
    pub fn select(&mut self, file: FileUpload) -> std::io::Result<&Path> {
        let preview = PreviewFile::create(&file.name, &file.bytes)?;
        self.file = Some(file);
        self.result = None;
        Ok(self.preview.insert(preview).path())
    }
}

/// State of the PDF modality.
#[derive(Debug, Default)]
pub struct PdfSession {
    pub file: Option<FileUpload>,
    pub result: Option<DocumentTranslation>,
}

impl PdfSession {
    /// Selects a new document and clears any previous result.
    pub fn select(&mut self, file: FileUpload) {
        self.file = Some(file);
        self.result = None;
    }
}

/// State of the speech modality.
///
/// The two text slots have multiple producers (initial recognition and
/// re-translation), so all writes go through the setters below.
#[derive(Debug, Default)]
pub struct SpeechSession {
    pub recording: bool,
    recognized_text: Option<String>,
    translation: Option<String>,
}

impl SpeechSession {
    /// Clears both text slots for a fresh recording cycle.
    pub fn reset_for_recording(&mut self) {
        self.recognized_text = None;
        self.translation = None;
    }

    /// Writes the recognized transcript and its translation together.
    pub fn set_recognition(&mut self, recognized: String, translation: String) {
        self.recognized_text = Some(recognized);
        self.translation = Some(translation);
    }

    /// Replaces only the translation; the transcript is kept.
    pub fn set_translation(&mut self, translation: String) {
        self.translation = Some(translation);
    }

    pub fn recognized_text(&self) -> Option<&str> {
        self.recognized_text.as_deref()
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_are_per_modality() {
        assert_eq!(
            Modality::Text.failure_message(),
            "Translation failed. Please try again."
        );
        assert_eq!(
            Modality::Image.failure_message(),
            "Image translation failed. Please try again."
        );
        assert_eq!(
            Modality::Pdf.failure_message(),
            "PDF translation failed. Please try again."
        );
        assert_eq!(
            Modality::Speech.failure_message(),
            "Speech recognition failed. Please try again."
        );
    }

    #[test]
    fn test_image_select_clears_result_and_replaces_preview() {
        let mut session = ImageSession::default();
        session.select(FileUpload::new("first.png", vec![1, 2, 3])).unwrap();
        session.result = Some(DocumentTranslation {
            extracted_text: "old".to_string(),
            translated_text: "alt".to_string(),
        });

        let first_preview = session.preview.as_ref().unwrap().path().to_path_buf();
        assert!(first_preview.exists());

        session.select(FileUpload::new("second.jpg", vec![4, 5])).unwrap();

        assert!(session.result.is_none());
        let second_preview = session.preview.as_ref().unwrap().path().to_path_buf();
        assert_ne!(first_preview, second_preview);
        assert!(!first_preview.exists());
        assert!(second_preview.exists());
        assert_eq!(session.file.as_ref().unwrap().name, "second.jpg");

        session.preview = None;
        assert!(!second_preview.exists());
    }

    #[test]
    fn test_preview_keeps_extension() {
        let mut session = ImageSession::default();
        let path = session
            .select(FileUpload::new("photo.webp", vec![0]))
            .unwrap()
            .to_path_buf();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("webp"));
    }

    #[test]
    fn test_pdf_select_clears_result() {
        let mut session = PdfSession::default();
        session.result = Some(DocumentTranslation {
            extracted_text: "old".to_string(),
            translated_text: "alt".to_string(),
        });

        session.select(FileUpload::new("report.pdf", vec![1]));
        assert!(session.result.is_none());
        assert_eq!(session.file.as_ref().unwrap().name, "report.pdf");
    }

    #[test]
    fn test_speech_recognition_writes_pair() {
        let mut session = SpeechSession::default();
        session.set_recognition("hello".to_string(), "bonjour".to_string());
        assert_eq!(session.recognized_text(), Some("hello"));
        assert_eq!(session.translation(), Some("bonjour"));
    }

    #[test]
    fn test_speech_retranslation_keeps_transcript() {
        let mut session = SpeechSession::default();
        session.set_recognition("hello".to_string(), "bonjour".to_string());
        session.set_translation("hola".to_string());
        assert_eq!(session.recognized_text(), Some("hello"));
        assert_eq!(session.translation(), Some("hola"));
    }

    #[test]
    fn test_speech_reset_clears_both_slots() {
        let mut session = SpeechSession::default();
        session.set_recognition("hello".to_string(), "bonjour".to_string());
        session.reset_for_recording();
        assert_eq!(session.recognized_text(), None);
        assert_eq!(session.translation(), None);
    }
}
