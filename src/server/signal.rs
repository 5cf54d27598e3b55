// Shutdown signals
// SIGTERM and SIGINT both mean "stop accepting and drain"

use std::sync::Arc;
use tokio::sync::Notify;

/// Spawn the signal listener and hand back the `Notify` it fires.
///
/// The accept loop selects on this notification; once it fires, no new
/// connections are taken and in-flight ones are drained.
#[cfg(unix)]
pub fn spawn_shutdown_listener() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        println!("\n[SIGNAL] {name} received, initiating graceful shutdown...");

        notify.notify_waiters();
    });

    shutdown
}

/// Non-Unix fallback: Ctrl+C only.
#[cfg(not(unix))]
pub fn spawn_shutdown_listener() -> Arc<Notify> {
    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[SIGNAL] Ctrl+C received, initiating graceful shutdown...");
            notify.notify_waiters();
        }
    });

    shutdown
}
