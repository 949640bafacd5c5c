use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use scroll_core::GeometrySnapshot;
use scroll_logging::scroll_trace;

/// Imperative side of the host scroll view.
pub trait ScrollSurface: Send + Sync {
    fn set_offset(&self, value: f64, animated: bool);
}

pub type GeometryCallback = Box<dyn Fn(GeometrySnapshot) + Send + Sync>;

/// Host layout engine emitting geometry on every relevant layout pass.
pub trait GeometrySource: Send + Sync {
    /// Registers `callback` until the returned handle is dropped or unsubscribed.
    fn observe(&self, callback: GeometryCallback) -> Subscription;
}

type Listeners = Vec<(u64, Arc<GeometryCallback>)>;

#[derive(Default)]
struct BroadcasterInner {
    listeners: Mutex<Listeners>,
    next_id: AtomicU64,
}

impl BroadcasterInner {
    fn listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Event-emitter backed [`GeometrySource`]; hosts call [`GeometryBroadcaster::emit`]
/// from their layout pass.
#[derive(Clone, Default)]
pub struct GeometryBroadcaster {
    inner: Arc<BroadcasterInner>,
}

impl GeometryBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, snapshot: GeometrySnapshot) {
        // Snapshot the listener list so callbacks may unsubscribe re-entrantly.
        let listeners: Vec<Arc<GeometryCallback>> = self
            .inner
            .listeners()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in listeners {
            (callback.as_ref())(snapshot);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners().len()
    }
}

impl GeometrySource for GeometryBroadcaster {
    fn observe(&self, callback: GeometryCallback) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.listeners().push((id, Arc::new(callback)));
        scroll_trace!("geometry listener {} subscribed", id);

        let weak: Weak<BroadcasterInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners().retain(|(listener, _)| *listener != id);
            }
        })
    }
}

/// Cancellable observation handle. Dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
