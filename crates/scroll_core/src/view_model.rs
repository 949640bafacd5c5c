use crate::{LoadPhase, PullPhase};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PullView {
    pub phase: PullPhase,
    pub distance: f64,
    pub progress: f64,
    pub threshold_reached: bool,
    pub is_pulling: bool,
    /// Action running; the indicator holds its frozen size.
    pub is_refreshing: bool,
}

/// Render-facing snapshot of a surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceViewModel {
    pub attached: bool,
    pub enabled: bool,
    pub auto_follow: bool,
    pub offset: f64,
    pub content_extent: f64,
    pub viewport_extent: f64,
    pub start_loading: bool,
    pub end_loading: bool,
    pub start_phase: LoadPhase,
    pub end_phase: LoadPhase,
    pub pull: PullView,
    pub stretching_value: f64,
    pub dirty: bool,
}
