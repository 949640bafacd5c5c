use std::sync::Arc;
use std::time::Duration;

use scroll_core::{Generation, LoadEdge, Msg};
use scroll_logging::{scroll_debug, scroll_error, scroll_trace, scroll_warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::{Loader, RefreshAction};

/// Runs the asynchronous side of a surface's state machines.
///
/// Every task and timer reports back by sending a [`Msg`] into the driver's
/// inbox; none of them touch surface state directly. Each attach cycle gets a
/// fresh session token, so [`LoadCoordinator::cancel_all`] drops interest in
/// everything spawned before it.
pub struct LoadCoordinator {
    msg_tx: UnboundedSender<Msg>,
    session: CancellationToken,
}

impl LoadCoordinator {
    pub fn new(msg_tx: UnboundedSender<Msg>) -> Self {
        Self {
            msg_tx,
            session: CancellationToken::new(),
        }
    }

    pub fn spawn_load(&self, edge: LoadEdge, generation: Generation, loader: Arc<dyn Loader>) {
        let token = self.session.child_token();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(Msg::LoadStarted { edge, generation });
            // The loader runs in its own task so a panic inside it is contained.
            let task = tokio::spawn(async move { loader.load(edge).await });
            tokio::select! {
                _ = token.cancelled() => {
                    scroll_debug!(
                        "{:?} load generation={} abandoned after teardown",
                        edge,
                        generation.value()
                    );
                }
                joined = task => {
                    if let Err(err) = joined {
                        report_join_error(&format!("{:?} load", edge), &err);
                    }
                    let _ = tx.send(Msg::LoadFinished { edge, generation });
                }
            }
        });
    }

    pub fn spawn_refresh(&self, generation: Generation, action: Arc<dyn RefreshAction>) {
        let token = self.session.child_token();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let task = tokio::spawn(async move { action.refresh().await });
            tokio::select! {
                _ = token.cancelled() => {
                    scroll_debug!("refresh generation={} abandoned after teardown", generation.value());
                }
                joined = task => {
                    if let Err(err) = joined {
                        report_join_error("refresh", &err);
                    }
                    let _ = tx.send(Msg::RefreshFinished { generation });
                }
            }
        });
    }

    /// Delivers `msg` after `delay` unless the session is cancelled first.
    pub fn schedule(&self, msg: Msg, delay: Duration) {
        let token = self.session.child_token();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(msg);
                }
            }
        });
    }

    /// Sends `msg` straight back into the inbox; used when no task is configured.
    pub fn complete_now(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Cancels every outstanding task and timer and starts a new session token.
    pub fn cancel_all(&mut self) {
        scroll_trace!("cancelling outstanding surface tasks");
        self.session.cancel();
        self.session = CancellationToken::new();
    }
}

/// The caller's task died; the surface still completes so loading never sticks.
fn report_join_error(task: &str, err: &JoinError) {
    if err.is_panic() {
        scroll_error!("{} task panicked; reporting completion anyway", task);
    } else {
        scroll_warn!("{} task failed: {}", task, err);
    }
}

impl Drop for LoadCoordinator {
    fn drop(&mut self) {
        self.session.cancel();
    }
}
