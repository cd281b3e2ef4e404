//! lingo - translate text, images, PDF documents and speech from the terminal.
//!
//! Entry point: builds the tokio runtime and hands control to [`app::run`].

mod app;
mod clipboard;
mod commands;
mod config;
mod logging;
mod recording;
mod setup;
mod translation;
mod workspace;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    app::run().await
}
