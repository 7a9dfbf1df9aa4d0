mod application;
mod common;
mod domain;
mod infrastructure;
mod presentation;

use presentation::cli::CliApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is controlled through RUST_LOG
    tracing_subscriber::fmt::init();

    CliApp::new().run().await
}
