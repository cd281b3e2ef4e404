//! List supported language codes.
//!
//! Also hosts the shared language-code resolution used by the translation
//! commands: a `--to`/`--spoken` flag wins over the configured default, and
//! unknown codes point the user at this command.

use crate::config::LingoConfig;
use crate::translation::{SpokenLanguage, TargetLanguage};

/// Lists all supported target and spoken language codes.
pub fn handle_languages() -> Result<(), anyhow::Error> {
    println!();
    println!(" ┃ · ┏┓ ┏┓ ┏┓ ");
    println!(" ┗ ┃ ┃┃ ┗┫ ┗┛ ");
    println!();
    println!("Target languages (use with --to or [languages].target):");
    println!();
    for language in TargetLanguage::all() {
        println!("  {:<8} {}", language.code(), language.name());
    }
    println!();
    println!("Spoken languages for speech recognition (use with --spoken or [languages].spoken):");
    println!();
    for language in SpokenLanguage::all() {
        println!("  {:<8} {}", language.code(), language.name());
    }
    println!();
    println!("Config file: ~/.config/lingo/lingo.toml");

    Ok(())
}

/// Resolves the target language from a flag, falling back to the configured
/// default.
///
/// # Errors
/// - If the flag carries an unknown language code
pub(crate) fn resolve_target(
    code: Option<&str>,
    config: &LingoConfig,
) -> anyhow::Result<TargetLanguage> {
    match code {
        Some(code) => TargetLanguage::from_code(code).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown target language code '{code}'. Run 'lingo languages' to list supported codes."
            )
        }),
        None => Ok(config.languages.target),
    }
}

/// Resolves the spoken language from a flag, falling back to the configured
/// default.
///
/// # Errors
/// - If the flag carries an unknown language code
pub(crate) fn resolve_spoken(
    code: Option<&str>,
    config: &LingoConfig,
) -> anyhow::Result<SpokenLanguage> {
    match code {
        Some(code) => SpokenLanguage::from_code(code).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown spoken language code '{code}'. Run 'lingo languages' to list supported codes."
            )
        }),
        None => Ok(config.languages.spoken),
    }
}
