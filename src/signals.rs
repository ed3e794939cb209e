// src/signals.rs

//! OS signal handling.
//!
//! [`wait_for_termination`] completes when the process receives SIGINT or
//! SIGTERM (plain Ctrl-C off unix). `lib::run` bridges it onto the
//! supervisor's termination channel, so the control loop treats an OS
//! signal as just another event in its multi-way wait.

/// Wait for a termination signal addressed to this process.
///
/// Each call creates independent signal listeners. Returns `Err` only if
/// signal registration fails.
#[cfg(unix)]
pub async fn wait_for_termination() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
    Ok(())
}

/// Wait for a termination signal addressed to this process.
#[cfg(not(unix))]
pub async fn wait_for_termination() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
