use crate::{Generation, GeometrySnapshot, LoadEdge};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Platform layout pass with fresh geometry.
    Geometry(GeometrySnapshot),
    /// Explicit request to load at an edge (e.g. a "load more" button).
    TriggerLoad { edge: LoadEdge },
    /// The load task for `generation` has been spawned.
    LoadStarted {
        edge: LoadEdge,
        generation: Generation,
    },
    /// The load task returned, panicked, or errored; the outcome is not interpreted.
    LoadFinished {
        edge: LoadEdge,
        generation: Generation,
    },
    /// Cooldown timer for the finished load fired.
    CooldownElapsed {
        edge: LoadEdge,
        generation: Generation,
    },
    /// Pull-to-refresh action returned.
    RefreshFinished { generation: Generation },
    /// Post-refresh settle timer fired.
    SettleElapsed { generation: Generation },
    /// Caller-owned loading flag changed (external loading mode only).
    SetExternalLoading { edge: LoadEdge, loading: bool },
    SetAutoFollow(bool),
    SetEnabled(bool),
    /// Jump to the trailing edge of the content.
    ScrollToEnd { animated: bool },
    /// Surface mounted, or remounted under a new identity.
    Attach,
    /// Surface unmounted; every in-flight operation becomes stale.
    Detach,
    NoOp,
}
