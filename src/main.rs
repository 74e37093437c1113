mod config;
mod game;
mod net;
mod render;
mod session;
mod util;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn, Level};

use crate::config::DisplayConfig;
use crate::net::event_buffer::{EventBufferError, EventSender};
use crate::net::protocol::InputEvent;
use crate::render::TraceCanvas;
use crate::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Pocket Arena v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = DisplayConfig::load_or_default();
    config.validate().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration loaded: {}x{} @ {} Hz",
        config.width, config.height, config.frame_rate
    );

    let mut session = Session::new(&config);
    let sender = session.event_sender();

    // Headless transport: newline-delimited JSON events on stdin, one per
    // controller message, forwarded into the frame loop's buffer
    tokio::spawn(async move {
        if let Err(e) = feed_stdin_events(sender).await {
            error!("stdin reader error: {}", e);
        }
    });

    // Shutdown signal handler
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received");
    };

    let mut canvas = TraceCanvas;
    tokio::select! {
        _ = session.run(&mut canvas) => {}
        _ = shutdown => {
            info!("Shutting down...");
        }
    }

    info!(
        "Session stopped: {} players, {} events dropped",
        session.world().player_count(),
        session.world().dropped_events()
    );

    Ok(())
}

/// Read JSON events from stdin until EOF, pushing each into the buffer
async fn feed_stdin_events(sender: EventSender) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match InputEvent::from_json(&line) {
            Ok(event) => match sender.try_send(event) {
                Ok(()) => {}
                Err(EventBufferError::Full) => warn!("event buffer full, input dropped"),
                Err(EventBufferError::Disconnected) => break,
            },
            Err(e) => warn!("ignoring malformed event: {}", e),
        }
    }
    Ok(())
}
