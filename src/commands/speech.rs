//! Record speech from the microphone, recognize and translate it.
//!
//! Recording stops on Enter, Ctrl-C or SIGUSR1 (external trigger). The
//! recognized transcript and its translation are printed; in an attended
//! terminal the transcript can then be re-translated into other languages
//! without recording again.

use crate::clipboard::copy_to_clipboard;
use crate::config;
use crate::recording::AudioRecorder;
use crate::translation::{LanguagePreference, RemoteService, TargetLanguage};
use crate::workspace::{Modality, Workspace};
use console::style;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Handles speech recording and translation.
///
/// Records from the configured input device until stopped, sends the clip
/// for recognition and translation, and prints the result. Supports external
/// triggers via SIGUSR1 signal.
///
/// # Arguments
/// * `to` - Target language code override
/// * `spoken` - Spoken language code override for recognition
/// * `clipboard` - If true, copy the translation to clipboard instead of stdout
/// * `output_file` - Optional file path to write the translation to instead of stdout
pub async fn handle_speech(
    to: Option<String>,
    spoken: Option<String>,
    clipboard: bool,
    output_file: Option<String>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== lingo Speech Translation ===");

    // Load configuration
    let config_data = match config::LingoConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {err}");
            return Err(anyhow::anyhow!("Configuration error: {err}"));
        }
    };

    let target = super::languages::resolve_target(to.as_deref(), &config_data)?;
    let spoken = super::languages::resolve_spoken(spoken.as_deref(), &config_data)?;

    tracing::info!(
        "Configuration loaded: device={}, sample_rate={}Hz, spoken={}, target={}",
        config_data.audio.device,
        config_data.audio.sample_rate,
        spoken.code(),
        target.code()
    );

    let service = RemoteService::new(
        &config_data.service.base_url,
        config_data.service.request_timeout(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize translation client: {e}"))?;

    let workspace = Workspace::new(Arc::new(service), LanguagePreference { target, spoken });
    workspace.set_active(Modality::Speech);

    let mut recorder = AudioRecorder::new(
        config_data.audio.device.clone(),
        config_data.audio.sample_rate,
    );

    workspace.begin_recording()?;
    if let Err(e) = recorder.start() {
        workspace.recording_failed(e.to_string());
        return Err(e.into());
    }

    // Stop triggers: Enter on stdin, Ctrl-C, or SIGUSR1 (external trigger)
    let term = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGUSR1, term.clone())
        .map_err(|e| anyhow::anyhow!("Failed to register signal handler: {e}"))?;
    {
        let term = term.clone();
        ctrlc::set_handler(move || {
            term.store(true, Ordering::SeqCst);
        })
        .map_err(|e| anyhow::anyhow!("Failed to set Ctrl-C handler: {e}"))?;
    }

    let enter = Arc::new(AtomicBool::new(false));
    if std::io::stdin().is_terminal() {
        let enter = enter.clone();
        std::thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
            enter.store(true, Ordering::SeqCst);
        });
        println!("Recording... Press Enter to stop.");
    } else {
        println!("Recording... Send SIGUSR1 or Ctrl-C to stop.");
    }

    let started = Instant::now();
    let mut ticks = 0u64;
    loop {
        if enter.load(Ordering::SeqCst) {
            break;
        }
        if term.load(Ordering::SeqCst) {
            tracing::info!("Stop signal received");
            break;
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        ticks += 1;
        if ticks.is_multiple_of(20) {
            tracing::debug!("Recording: {:.1}s elapsed", started.elapsed().as_secs_f32());
        }
    }

    tracing::debug!("Stopping recording...");
    let clip = match recorder.stop() {
        Ok(clip) => clip,
        Err(e) => {
            workspace.recording_failed(e.to_string());
            return Err(e.into());
        }
    };

    let Some(result) = workspace.finish_recording(clip).await? else {
        println!("No audio captured.");
        return Ok(());
    };

    // Determine output destination: file > clipboard > stdout (default)
    if let Some(file_path) = output_file {
        std::fs::write(&file_path, &result.translated_text)
            .map_err(|e| anyhow::anyhow!("Failed to write to file '{file_path}': {e}"))?;
        tracing::debug!("Translated text written to file: {file_path}");
        return Ok(());
    }
    if clipboard {
        if let Err(e) = copy_to_clipboard(&result.translated_text) {
            tracing::warn!("Failed to copy to clipboard: {e}");
        } else {
            tracing::debug!("Translated text copied to clipboard");
        }
        return Ok(());
    }

    println!();
    println!("{} {}", style("Recognized:").bold(), result.recognized_text);
    println!("{} {}", style("Translation:").bold(), result.translated_text);

    // Offer re-translation of the transcript, but only in an attended
    // terminal. A signal stop leaves the stdin reader parked, so prompts
    // would fight it for input.
    if term.load(Ordering::SeqCst) || !std::io::stdout().is_terminal() {
        return Ok(());
    }

    loop {
        println!();
        let again = cliclack::confirm("Translate the transcript into another language?")
            .initial_value(false)
            .interact()
            .map_err(|e| anyhow::anyhow!("Prompt cancelled: {e}"))?;
        if !again {
            break;
        }

        let mut select_prompt = cliclack::select("Select target language:");
        for language in TargetLanguage::all() {
            select_prompt = select_prompt.item(*language, language.name(), language.code());
        }
        let language: TargetLanguage = select_prompt
            .interact()
            .map_err(|e| anyhow::anyhow!("Selection cancelled: {e}"))?;

        workspace.set_target_language(language);
        match workspace.retranslate_speech().await {
            Ok(translation) => {
                println!("{} {}", style("Translation:").bold(), translation);
            }
            Err(e) => {
                eprintln!("Error: {e}");
            }
        }
    }

    Ok(())
}
