//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands;
use crate::logging;
use anyhow::anyhow;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use dirs;
use std::io;
use std::path::PathBuf;
use std::process;

/// Checks if setup is needed (version mismatch or missing config) and runs setup if required.
///
/// This is called early in the startup sequence, before command handling.
/// It checks:
/// 1. If config file doesn't exist, runs full setup
/// 2. If config version is older than app version, runs setup and logs migration
/// 3. If config version matches app version, does nothing
async fn check_and_run_setup() -> Result<(), anyhow::Error> {
    let config_path = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?
        .join(".config")
        .join("lingo")
        .join("lingo.toml");

    match crate::setup::version::check_setup_needed(&config_path)? {
        Some(old_version) => {
            // Setup is needed - either config doesn't exist or version is older
            tracing::info!(
                "Setup needed - migrating from version {} to {}",
                old_version,
                env!("CARGO_PKG_VERSION")
            );
            crate::setup::run_setup().map_err(|e| {
                tracing::error!("Setup failed: {e}");
                anyhow!("Setup failed: {e}")
            })?;
            crate::setup::version::update_config_version(&config_path).map_err(|e| {
                tracing::error!("Failed to update config version: {e}");
                anyhow!("Failed to update config version: {e}")
            })?;
            tracing::info!(
                "Setup completed successfully - migrated to version {}",
                env!("CARGO_PKG_VERSION")
            );
        }
        None => {
            // Config exists and version matches, no setup needed
            tracing::debug!("Config version up to date ({})", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// A command-line translator for text, images, PDF documents and speech
#[derive(Parser)]
#[command(name = "lingo")]
#[command(version)]
#[command(about = "\n\n ┃ · ┏┓ ┏┓ ┏┓ \n ┗ ┃ ┃┃ ┗┫ ┗┛")]
#[command(long_about = "\n\n ┃ · ┏┓ ┏┓ ┏┓ \n ┗ ┃ ┃┃ ┗┫ ┗┛\n\nA command-line client for a self-hosted translation service.\nTranslates text, images, PDF documents and recorded speech.\n\nDEFAULT COMMAND:\n    If no command is specified, 'text' is used by default.\n    Text options (-c, -o, --to) can be used without explicitly saying 'text'.\n\nEXAMPLES:\n    # Translate stdin and pipe to other commands (default stdout)\n    $ echo \"Hello\" | lingo\n    $ cat notes.txt | lingo --to ml\n    \n    # Translate an argument and copy to clipboard\n    $ lingo text \"Good morning\" --to hi -c\n    \n    # Translate to a file\n    $ echo \"Hello\" | lingo -o translated.txt\n    \n    # Translate an image or a PDF\n    $ lingo image photo.png --to ta\n    $ lingo pdf manual.pdf -o manual-en.txt\n    \n    # Record speech and translate it\n    $ lingo speech --spoken ml-IN --to en\n    \n    # List supported language codes\n    $ lingo languages\n    \n    # Edit configuration file\n    $ lingo config")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/lingo/lingo.toml\n    Logs:               ~/.local/state/lingo/lingo.log.*\n\nThe translation service URL is set in the [service] config section."
)]
struct Cli {
    /// Copy translation to clipboard instead of stdout (text default command)
    #[arg(short, long, global = true)]
    clipboard: bool,

    /// Write translation to file instead of stdout (text default command)
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<String>,

    /// Target language code (text default command)
    #[arg(long, value_name = "CODE", global = true)]
    to: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate text (default)
    ///
    /// Translates the given text, or stdin when no text is passed.
    /// By default the translation outputs to stdout for piping to other commands.
    #[command(visible_alias = "t")]
    Text {
        /// Text to translate (reads stdin when omitted)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Target language code (see 'lingo languages')
        #[arg(long, value_name = "CODE")]
        to: Option<String>,

        /// Copy translation to clipboard instead of stdout
        #[arg(short, long)]
        clipboard: bool,

        /// Write translation to file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Translate the text found in an image
    ///
    /// Runs OCR on the image and translates the extracted text.
    /// Prints both the extracted text and its translation.
    #[command(visible_alias = "i")]
    Image {
        /// Path to the image file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target language code (see 'lingo languages')
        #[arg(long, value_name = "CODE")]
        to: Option<String>,

        /// Copy translation to clipboard instead of stdout
        #[arg(short, long)]
        clipboard: bool,

        /// Write translation to file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Translate the text content of a PDF document
    ///
    /// Extracts the document text and translates it.
    /// Prints both the extracted text and its translation.
    #[command(visible_alias = "p")]
    Pdf {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target language code (see 'lingo languages')
        #[arg(long, value_name = "CODE")]
        to: Option<String>,

        /// Copy translation to clipboard instead of stdout
        #[arg(short, long)]
        clipboard: bool,

        /// Write translation to file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Record speech, recognize and translate it
    ///
    /// Records from the configured input device until Enter is pressed.
    /// Prints the recognized transcript and its translation; the transcript
    /// can then be re-translated into other languages without recording again.
    #[command(visible_alias = "s")]
    Speech {
        /// Target language code (see 'lingo languages')
        #[arg(long, value_name = "CODE")]
        to: Option<String>,

        /// Spoken language code for recognition (see 'lingo languages')
        #[arg(long, value_name = "CODE")]
        spoken: Option<String>,

        /// Copy translation to clipboard instead of stdout
        #[arg(short, long)]
        clipboard: bool,

        /// Write translation to file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// List supported language codes
    ///
    /// Shows target language codes for --to and spoken language codes
    /// for --spoken, matching the [languages] config section.
    #[command(visible_alias = "l")]
    Languages,

    /// Open configuration file in your preferred editor
    ///
    /// Edit service, language and audio settings.
    /// Uses $EDITOR environment variable or falls back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// List available audio input devices
    ///
    /// Shows device IDs, names, and configurations to help configure
    /// the correct input device in lingo.toml.
    #[command(name = "list-devices")]
    ListDevices,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    /// Useful for troubleshooting issues.
    Logs,

    /// Generate shell completion script
    ///
    /// Generate completion script for your shell. Save the output to your
    /// shell's completion directory or source it directly.
    ///
    /// Examples:
    ///   lingo completions bash > lingo.bash
    ///   lingo completions zsh > _lingo
    ///   lingo completions fish > lingo.fish
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Exit Codes
/// - 0: Success
/// - 1: General error
/// - 2: Usage error (invalid arguments)
///
/// # Errors
/// - If setup fails
/// - If logging initialization fails
/// - If command execution fails (e.g., translation, recording, config editing)
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Handle commands that don't need logging or config setup
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "lingo", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::ListDevices) => {
            return match commands::handle_list_devices() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        Some(Commands::Logs) => {
            return match commands::handle_logs() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        Some(Commands::Languages) => {
            return match commands::handle_languages() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        _ => {}
    }

    // Initialize logging for all other commands
    logging::init_logging()?;

    // Check if setup is needed (version check or missing config)
    check_and_run_setup().await?;

    // Route to appropriate command handler
    match cli.command {
        None | Some(Commands::Text { .. }) => {
            // Default command is text
            // Merge top-level options with explicit text command options
            // If both are specified, the explicit text command options take precedence
            let (text, to, clipboard, output) = match cli.command {
                Some(Commands::Text {
                    text,
                    to,
                    clipboard,
                    output,
                }) => (
                    text,
                    to.or(cli.to),
                    clipboard || cli.clipboard,
                    output.or(cli.output),
                ),
                None => (None, cli.to, cli.clipboard, cli.output),
                _ => unreachable!(),
            };
            commands::handle_text(text, to, clipboard, output).await?;
        }
        Some(Commands::Image {
            file,
            to,
            clipboard,
            output,
        }) => {
            commands::handle_image(
                file,
                to.or(cli.to),
                clipboard || cli.clipboard,
                output.or(cli.output),
            )
            .await?;
        }
        Some(Commands::Pdf {
            file,
            to,
            clipboard,
            output,
        }) => {
            commands::handle_pdf(
                file,
                to.or(cli.to),
                clipboard || cli.clipboard,
                output.or(cli.output),
            )
            .await?;
        }
        Some(Commands::Speech {
            to,
            spoken,
            clipboard,
            output,
        }) => {
            let result = commands::handle_speech(
                to.or(cli.to),
                spoken,
                clipboard || cli.clipboard,
                output.or(cli.output),
            )
            .await;
            if let Err(e) = result {
                // Check if it's a cancellation error (cliclack already displayed the message)
                let err_msg = e.to_string();
                if err_msg.contains("cancelled") || err_msg.contains("interrupted") {
                    // Silent exit - cliclack already showed "Operation cancelled"
                    process::exit(0);
                } else {
                    return Err(e);
                }
            }
        }
        Some(Commands::Config) => {
            commands::handle_config()?;
        }
        Some(Commands::Completions { .. })
        | Some(Commands::ListDevices)
        | Some(Commands::Logs)
        | Some(Commands::Languages) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
