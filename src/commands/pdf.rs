//! Translate the text content of a PDF document.
//!
//! Sends a PDF file through the document translation endpoint and prints the
//! extracted text together with its translation.

use crate::clipboard::copy_to_clipboard;
use crate::config;
use crate::translation::{FileUpload, LanguagePreference, RemoteService};
use crate::workspace::{Modality, Workspace};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;

use super::languages::resolve_target;

/// Handles translation of a PDF document.
///
/// # Arguments
/// * `file` - Path to the PDF to translate
/// * `to` - Target language code override
/// * `clipboard` - If true, copy the translation to clipboard instead of stdout
/// * `output_file` - Optional file path to write the translation to instead of stdout
pub async fn handle_pdf(
    file: PathBuf,
    to: Option<String>,
    clipboard: bool,
    output_file: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== lingo PDF Translation ===");

    // Validate the input file exists and looks like a PDF
    if !file.exists() {
        return Err(anyhow::anyhow!("PDF file not found: {}", file.display()));
    }
    let is_pdf = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(anyhow::anyhow!("Not a PDF file: {}", file.display()));
    }

    // Load configuration
    let config_data = match config::LingoConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {err}");
            return Err(anyhow::anyhow!("Configuration error: {err}"));
        }
    };

    let target = resolve_target(to.as_deref(), &config_data)?;

    let bytes = std::fs::read(&file)
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {e}", file.display()))?;
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();

    tracing::info!("Translating PDF: {}", file.display());

    let service = RemoteService::new(
        &config_data.service.base_url,
        config_data.service.request_timeout(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize translation client: {e}"))?;

    let workspace = Workspace::new(
        Arc::new(service),
        LanguagePreference {
            target,
            spoken: config_data.languages.spoken,
        },
    );
    workspace.set_active(Modality::Pdf);

    workspace.select_pdf(FileUpload::new(name, bytes));
    let result = workspace.translate_pdf().await?;

    // Determine output destination: file > clipboard > stdout (default)
    if let Some(file_path) = output_file {
        std::fs::write(&file_path, &result.translated_text)
            .map_err(|e| anyhow::anyhow!("Failed to write to file '{file_path}': {e}"))?;
        tracing::debug!("Translated text written to file: {file_path}");
    } else if clipboard {
        if let Err(e) = copy_to_clipboard(&result.translated_text) {
            tracing::warn!("Failed to copy to clipboard: {e}");
        } else {
            tracing::debug!("Translated text copied to clipboard");
        }
    } else {
        println!();
        println!("{}", style("Extracted text").bold());
        println!("{}", result.extracted_text);
        println!();
        println!("{}", style("Translation").bold());
        println!("{}", result.translated_text);
    }

    Ok(())
}
