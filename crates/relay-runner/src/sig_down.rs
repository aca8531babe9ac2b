use tokio::signal::unix::SignalKind;
use tokio::signal::unix::signal;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Handles graceful shutdown on SIGTERM and SIGINT signals for the polling
/// loop in `main.rs`.
///
/// Spawns a background task that listens for shutdown signals and triggers
/// a cancellation token when received. The scanner checks this token at the
/// start of every RPC-touching step, so a shutdown always lands between
/// steps of a scan rather than mid-RPC-call.
pub struct SigDown {
    task_tracker: TaskTracker,
    cancellation_token: CancellationToken,
}

impl SigDown {
    pub fn try_new() -> Result<Self, std::io::Error> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let inner = CancellationToken::new();
        let outer = inner.clone();
        let task_tracker = TaskTracker::new();
        task_tracker.spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("received SIGTERM, shutting down after the current scan step");
                    inner.cancel();
                },
                _ = sigint.recv() => {
                    tracing::info!("received SIGINT, shutting down after the current scan step");
                    inner.cancel();
                }
            }
        });
        task_tracker.close();
        Ok(Self {
            task_tracker,
            cancellation_token: outer,
        })
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Waits for the signal-handling task to finish reacting to a shutdown
    /// signal, so `main` doesn't exit mid-log-line on the way out.
    pub async fn wait_for_signal_handler(&self) {
        self.cancellation_token.cancelled().await;
        self.task_tracker.wait().await;
    }
}
