//! Translation service types and client.
//!
//! This module provides the language catalogs and the client interface to the
//! remote translation service that backs all four input modalities.

pub mod api;
pub mod languages;

pub use api::{
    DocumentTranslation, FileUpload, RemoteService, ServiceError, SpeechTranslation,
    TextTranslation, TranslationService,
};
pub use languages::{LanguagePreference, SpokenLanguage, TargetLanguage};
