use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::GameState;

/// What a view renders from the poller.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSnapshot {
    /// Last successfully fetched state. Survives later failures.
    pub state: Option<GameState>,
    /// Message from the most recent failed fetch, cleared by the next success.
    pub error: Option<String>,
    /// True until the first fetch attempt has finished.
    pub loading: bool,
}

/// Background task fetching the session's game state on a fixed interval.
///
/// One attempt per tick, no retry or backoff. The task is aborted when the
/// poller is stopped or dropped, so no response lands after teardown.
pub struct GameStatePoller {
    rx: watch::Receiver<PollSnapshot>,
    refetch: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl GameStatePoller {
    /// Start polling `session_id` every `interval`, beginning immediately.
    ///
    /// Without a session id nothing is fetched and the snapshot is idle
    /// (`loading == false`, no state, no error).
    pub fn spawn(client: ApiClient, session_id: Option<String>, interval: Duration) -> Self {
        let refetch = Arc::new(Notify::new());
        let Some(session_id) = session_id else {
            let (_tx, rx) = watch::channel(PollSnapshot {
                state: None,
                error: None,
                loading: false,
            });
            return Self {
                rx,
                refetch,
                task: None,
            };
        };

        let (tx, rx) = watch::channel(PollSnapshot {
            state: None,
            error: None,
            loading: true,
        });
        let notify = Arc::clone(&refetch);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(session_id, ?interval, "Game state poller started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {},
                    _ = notify.notified() => {},
                }
                poll_once(&client, &session_id, &tx).await;
            }
        });

        Self {
            rx,
            refetch,
            task: Some(task),
        }
    }

    pub fn snapshot(&self) -> PollSnapshot {
        self.rx.borrow().clone()
    }

    /// A receiver that is notified after every fetch attempt.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.rx.clone()
    }

    /// Fetch now instead of waiting for the next tick.
    pub fn refetch(&self) {
        self.refetch.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Abort the polling task. The last snapshot stays readable.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Game state poller stopped");
        }
    }
}

impl Drop for GameStatePoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_once(client: &ApiClient, session_id: &str, tx: &watch::Sender<PollSnapshot>) {
    match client.game_state(session_id).await {
        Ok(state) => {
            tx.send_modify(|snap| {
                snap.state = Some(state);
                snap.error = None;
                snap.loading = false;
            });
        },
        Err(e) => {
            tracing::warn!(session_id, error = %e, "Failed to fetch game state");
            let message = error_message(&e);
            tx.send_modify(|snap| {
                snap.error = Some(message);
                snap.loading = false;
            });
        },
    }
}

/// Text shown to the player: the server's own message when it sent one.
fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
