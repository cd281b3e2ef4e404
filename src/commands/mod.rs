//! Application command handlers for lingo.
//!
//! This module organizes command handling into separate submodules, each responsible for a specific
//! application command (text, image, PDF and speech translation, plus utilities).
//!
//! # Commands
//! - `text`: Translate an argument or stdin through the text endpoint
//! - `image`: Send an image for OCR and translation
//! - `pdf`: Send a PDF document for extraction and translation
//! - `speech`: Record from the microphone, recognize and translate
//! - `languages`: List supported target and spoken language codes
//! - `config`: Open configuration file in user's preferred editor
//! - `list_devices`: List available audio input devices
//! - `logs`: Display recent log entries

pub mod config;
pub mod image;
pub mod languages;
pub mod list_devices;
pub mod logs;
pub mod pdf;
pub mod speech;
pub mod text;

pub use config::handle_config;
pub use image::handle_image;
pub use languages::handle_languages;
pub use list_devices::handle_list_devices;
pub use logs::handle_logs;
pub use pdf::handle_pdf;
pub use speech::handle_speech;
pub use text::handle_text;
