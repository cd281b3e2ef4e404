//! Translate text from an argument or stdin.
//!
//! This is the default command. Text is read from the command line when
//! given, otherwise from stdin, and sent through the text translation
//! endpoint of the configured service.

use crate::clipboard::copy_to_clipboard;
use crate::config;
use crate::translation::{LanguagePreference, RemoteService};
use crate::workspace::Workspace;
use std::io::{IsTerminal, Read};
use std::sync::Arc;

use super::languages::resolve_target;

/// Handles text translation.
///
/// Translates the given text (or stdin when no text is passed) into the
/// target language from `--to` or the configured default.
///
/// # Arguments
/// * `text` - Text to translate; stdin is read to end when `None`
/// * `to` - Target language code override
/// * `clipboard` - If true, copy to clipboard instead of stdout
/// * `output_file` - Optional file path to write output to instead of stdout
pub async fn handle_text(
    text: Option<String>,
    to: Option<String>,
    clipboard: bool,
    output_file: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== lingo Text Translation ===");

    // Load configuration
    let config_data = match config::LingoConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {err}");
            return Err(anyhow::anyhow!("Configuration error: {err}"));
        }
    };

    let target = resolve_target(to.as_deref(), &config_data)?;

    // Resolve the input: argument wins, otherwise read stdin to end
    let input = match text {
        Some(text) => text,
        None => {
            if std::io::stdin().is_terminal() {
                eprintln!("Reading from stdin. Press Ctrl-D to translate.");
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow::anyhow!("Failed to read from stdin: {e}"))?;
            buffer
        }
    };

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

    workspace.set_text_input(input);
    let translation = workspace.translate_text().await?;

    // Determine output destination: file > clipboard > stdout (default)
    if let Some(file_path) = output_file {
        std::fs::write(&file_path, &translation)
            .map_err(|e| anyhow::anyhow!("Failed to write to file '{file_path}': {e}"))?;
        tracing::debug!("Translated text written to file: {file_path}");
    } else if clipboard {
        if let Err(e) = copy_to_clipboard(&translation) {
            tracing::warn!("Failed to copy to clipboard: {e}");
        } else {
            tracing::debug!("Translated text copied to clipboard");
        }
    } else {
        // Default: stdout
        println!("{translation}");
        tracing::debug!("Translated text printed to stdout");
    }

    Ok(())
}
