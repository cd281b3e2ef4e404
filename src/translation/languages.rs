//! Language catalogs for translation and speech recognition.
//!
//! Defines the closed set of target languages the translation service accepts
//! and the spoken languages the speech recognizer understands. Codes follow
//! the service's wire format (ISO 639-1 for targets, BCP 47 for spoken).

use serde::{Deserialize, Serialize};

/// A language translations can be produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TargetLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "zh-CN")]
    ChineseSimplified,
}

impl TargetLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Malayalam => "ml",
            TargetLanguage::Hindi => "hi",
            TargetLanguage::Tamil => "ta",
            TargetLanguage::Telugu => "te",
            TargetLanguage::Kannada => "kn",
            TargetLanguage::Spanish => "es",
            TargetLanguage::French => "fr",
            TargetLanguage::German => "de",
            TargetLanguage::Japanese => "ja",
            TargetLanguage::Russian => "ru",
            TargetLanguage::Arabic => "ar",
            TargetLanguage::Portuguese => "pt",
            TargetLanguage::Italian => "it",
            TargetLanguage::Korean => "ko",
            TargetLanguage::ChineseSimplified => "zh-CN",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Malayalam => "Malayalam",
            TargetLanguage::Hindi => "Hindi",
            TargetLanguage::Tamil => "Tamil",
            TargetLanguage::Telugu => "Telugu",
            TargetLanguage::Kannada => "Kannada",
            TargetLanguage::Spanish => "Spanish",
            TargetLanguage::French => "French",
            TargetLanguage::German => "German",
            TargetLanguage::Japanese => "Japanese",
            TargetLanguage::Russian => "Russian",
            TargetLanguage::Arabic => "Arabic",
            TargetLanguage::Portuguese => "Portuguese",
            TargetLanguage::Italian => "Italian",
            TargetLanguage::Korean => "Korean",
            TargetLanguage::ChineseSimplified => "Chinese (Simplified)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(TargetLanguage::English),
            "ml" => Some(TargetLanguage::Malayalam),
            "hi" => Some(TargetLanguage::Hindi),
            "ta" => Some(TargetLanguage::Tamil),
            "te" => Some(TargetLanguage::Telugu),
            "kn" => Some(TargetLanguage::Kannada),
            "es" => Some(TargetLanguage::Spanish),
            "fr" => Some(TargetLanguage::French),
            "de" => Some(TargetLanguage::German),
            "ja" => Some(TargetLanguage::Japanese),
            "ru" => Some(TargetLanguage::Russian),
            "ar" => Some(TargetLanguage::Arabic),
            "pt" => Some(TargetLanguage::Portuguese),
            "it" => Some(TargetLanguage::Italian),
            "ko" => Some(TargetLanguage::Korean),
            "zh-CN" => Some(TargetLanguage::ChineseSimplified),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            TargetLanguage::English,
            TargetLanguage::Malayalam,
            TargetLanguage::Hindi,
            TargetLanguage::Tamil,
            TargetLanguage::Telugu,
            TargetLanguage::Kannada,
            TargetLanguage::Spanish,
            TargetLanguage::French,
            TargetLanguage::German,
            TargetLanguage::Japanese,
            TargetLanguage::Russian,
            TargetLanguage::Arabic,
            TargetLanguage::Portuguese,
            TargetLanguage::Italian,
            TargetLanguage::Korean,
            TargetLanguage::ChineseSimplified,
        ]
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A language the speech recognizer accepts as recording input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpokenLanguage {
    #[default]
    #[serde(rename = "ml-IN")]
    Malayalam,
    #[serde(rename = "en-IN")]
    EnglishIndia,
    #[serde(rename = "en-US")]
    EnglishUs,
    #[serde(rename = "hi-IN")]
    Hindi,
    #[serde(rename = "ta-IN")]
    Tamil,
    #[serde(rename = "te-IN")]
    Telugu,
    #[serde(rename = "kn-IN")]
    Kannada,
    #[serde(rename = "es-ES")]
    Spanish,
    #[serde(rename = "fr-FR")]
    French,
}

impl SpokenLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            SpokenLanguage::Malayalam => "ml-IN",
            SpokenLanguage::EnglishIndia => "en-IN",
            SpokenLanguage::EnglishUs => "en-US",
            SpokenLanguage::Hindi => "hi-IN",
            SpokenLanguage::Tamil => "ta-IN",
            SpokenLanguage::Telugu => "te-IN",
            SpokenLanguage::Kannada => "kn-IN",
            SpokenLanguage::Spanish => "es-ES",
            SpokenLanguage::French => "fr-FR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpokenLanguage::Malayalam => "Malayalam",
            SpokenLanguage::EnglishIndia => "English (India)",
            SpokenLanguage::EnglishUs => "English (US)",
            SpokenLanguage::Hindi => "Hindi",
            SpokenLanguage::Tamil => "Tamil",
            SpokenLanguage::Telugu => "Telugu",
            SpokenLanguage::Kannada => "Kannada",
            SpokenLanguage::Spanish => "Spanish",
            SpokenLanguage::French => "French",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ml-IN" => Some(SpokenLanguage::Malayalam),
            "en-IN" => Some(SpokenLanguage::EnglishIndia),
            "en-US" => Some(SpokenLanguage::EnglishUs),
            "hi-IN" => Some(SpokenLanguage::Hindi),
            "ta-IN" => Some(SpokenLanguage::Tamil),
            "te-IN" => Some(SpokenLanguage::Telugu),
            "kn-IN" => Some(SpokenLanguage::Kannada),
            "es-ES" => Some(SpokenLanguage::Spanish),
            "fr-FR" => Some(SpokenLanguage::French),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            SpokenLanguage::Malayalam,
            SpokenLanguage::EnglishIndia,
            SpokenLanguage::EnglishUs,
            SpokenLanguage::Hindi,
            SpokenLanguage::Tamil,
            SpokenLanguage::Telugu,
            SpokenLanguage::Kannada,
            SpokenLanguage::Spanish,
            SpokenLanguage::French,
        ]
    }
}

impl std::fmt::Display for SpokenLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Language pair a workspace translates with until changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LanguagePreference {
    pub target: TargetLanguage,
    pub spoken: SpokenLanguage,
}
