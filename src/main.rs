//! ephys-event-listener entry point.
//!
//! Connects to the configured Event Broadcaster and logs every spike and
//! TTL event until Ctrl-C.

use tracing_subscriber::EnvFilter;

use ephys_event_listener::listener::LogHandler;
use ephys_event_listener::{EventListener, ListenerConfig, StopReason};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ListenerConfig::from_env();
    let listener = EventListener::from_config(&config)?;
    let handle = listener.stop_handle();

    // The poll loop blocks, so it gets its own thread
    let mut worker = tokio::task::spawn_blocking(move || listener.run(&mut LogHandler));

    let finished = tokio::select! {
        joined = &mut worker => Some(joined?),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            None
        }
    };

    let reason = match finished {
        Some(reason) => reason,
        None => {
            handle.interrupt();
            worker.await?
        }
    };

    if reason == StopReason::Interrupted {
        tracing::info!("shut down on interrupt");
    }

    Ok(())
}
