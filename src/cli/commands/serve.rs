//! Serve Command
//!
//! Run the HTTP API.

use std::sync::Arc;

use crate::cli::util::CommandContext;
use crate::server::{self, AppState};
use crate::types::Result;

pub async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    let ctx = CommandContext::load()?;

    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = port.unwrap_or(ctx.config.server.port);

    println!("Starting MoodEcho API at http://{}:{}", host, port);
    println!("Press Ctrl+C to stop");

    let state = AppState::new(Arc::new(ctx.ingestor()));
    server::serve(state, &host, port).await
}
