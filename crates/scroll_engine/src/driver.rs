use std::sync::Arc;

use scroll_core::{update, Effect, LoadEdge, Msg, ScrollConfig, SurfaceState, SurfaceViewModel};
use scroll_logging::{next_layout_pass, scroll_debug, scroll_trace, scroll_warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    GeometrySource, LoadCoordinator, Loader, RefreshAction, ScrollSurface, Subscription, SurfaceId,
};

/// Owns one surface's state and executes the effects its updates produce.
///
/// Geometry callbacks, task completions and timers all arrive through a
/// single inbox; only the driver mutates [`SurfaceState`], so every
/// transition happens on whichever task polls the driver. Dropping the driver
/// unsubscribes and cancels every outstanding task and timer.
pub struct SurfaceDriver {
    id: SurfaceId,
    state: SurfaceState,
    surface: Arc<dyn ScrollSurface>,
    loader: Option<Arc<dyn Loader>>,
    refresh: Option<Arc<dyn RefreshAction>>,
    coordinator: LoadCoordinator,
    msg_tx: UnboundedSender<Msg>,
    msg_rx: UnboundedReceiver<Msg>,
    subscription: Option<Subscription>,
}

impl SurfaceDriver {
    pub fn new(id: SurfaceId, config: ScrollConfig, surface: Arc<dyn ScrollSurface>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            id,
            state: SurfaceState::new(config),
            surface,
            loader: None,
            refresh: None,
            coordinator: LoadCoordinator::new(msg_tx.clone()),
            msg_tx,
            msg_rx,
            subscription: None,
        }
    }

    pub fn with_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_refresh(mut self, action: Arc<dyn RefreshAction>) -> Self {
        self.refresh = Some(action);
        self
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn view(&self) -> SurfaceViewModel {
        self.state.view()
    }

    /// Returns whether a re-render was requested since the last call, and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Inbox handle for callers that report from other tasks (e.g. an external loading flag).
    pub fn sender(&self) -> UnboundedSender<Msg> {
        self.msg_tx.clone()
    }

    /// Subscribes to `source` and (re)mounts the surface with a clean session.
    pub fn attach(&mut self, source: &dyn GeometrySource) {
        self.subscription = None;
        self.drain_inbox();
        let tx = self.msg_tx.clone();
        self.subscription = Some(source.observe(Box::new(move |snapshot| {
            let _ = tx.send(Msg::Geometry(snapshot));
        })));
        scroll_debug!("surface {} attached", self.id);
        self.dispatch(Msg::Attach);
    }

    /// Synchronously stops observing and forces every state machine to Idle.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.drain_inbox();
        self.dispatch(Msg::Detach);
        scroll_debug!("surface {} detached", self.id);
    }

    /// Fires a load at `edge` unless one is already pending, running or cooling down.
    pub fn trigger_load(&mut self, edge: LoadEdge) {
        self.dispatch(Msg::TriggerLoad { edge });
    }

    pub fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::Geometry(_)) {
            next_layout_pass();
        }
        scroll_trace!("surface {} dispatch {:?}", self.id, msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.run_effects(effects);
    }

    /// Drains the inbox without waiting. Returns the number of messages handled.
    pub fn process_pending(&mut self) -> usize {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        let handled = inbox.len();
        for msg in inbox {
            self.dispatch(msg);
        }
        handled
    }

    /// Waits for the next inbox message and handles it.
    pub async fn next_message(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Drops everything queued by the previous session, including geometry
    /// from a source that is no longer observed.
    fn drain_inbox(&mut self) {
        while self.msg_rx.try_recv().is_ok() {}
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetOffset { value, animated } => {
                    scroll_debug!(
                        "surface {} set offset {} animated={}",
                        self.id,
                        value,
                        animated
                    );
                    self.surface.set_offset(value, animated);
                }
                Effect::StartLoad { edge, generation } => match &self.loader {
                    Some(loader) => self.coordinator.spawn_load(edge, generation, loader.clone()),
                    None => {
                        scroll_warn!("surface {} has no loader for {:?}", self.id, edge);
                        self.coordinator
                            .complete_now(Msg::LoadFinished { edge, generation });
                    }
                },
                Effect::ScheduleCooldown {
                    edge,
                    generation,
                    delay,
                } => self
                    .coordinator
                    .schedule(Msg::CooldownElapsed { edge, generation }, delay),
                Effect::StartRefresh { generation } => match &self.refresh {
                    Some(action) => self.coordinator.spawn_refresh(generation, action.clone()),
                    None => {
                        scroll_warn!("surface {} has no refresh action", self.id);
                        self.coordinator
                            .complete_now(Msg::RefreshFinished { generation });
                    }
                },
                Effect::ScheduleSettle { generation, delay } => self
                    .coordinator
                    .schedule(Msg::SettleElapsed { generation }, delay),
                Effect::CancelPending => self.coordinator.cancel_all(),
            }
        }
    }
}
