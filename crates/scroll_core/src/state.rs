use crate::view_model::{PullView, SurfaceViewModel};
use crate::{
    LoadEdge, LoadRequest, LoadingMode, PullTracker, ScrollConfig, ScrollSession, StretchTracker,
};

/// Load lifecycle plus the `is_loading` flag for one edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct EdgeLoad {
    pub(crate) request: LoadRequest,
    pub(crate) is_loading: bool,
}

/// Everything one scroll surface owns between mount and unmount.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    pub(crate) config: ScrollConfig,
    pub(crate) session: ScrollSession,
    pub(crate) loads: [EdgeLoad; 2],
    pub(crate) pull: PullTracker,
    pub(crate) stretch: StretchTracker,
    pub(crate) attached: bool,
    dirty: bool,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl SurfaceState {
    /// A mounted surface with no geometry observed yet.
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            session: ScrollSession::new(config.auto_follow),
            loads: Default::default(),
            pull: PullTracker::new(config.pull_threshold),
            stretch: StretchTracker::default(),
            attached: true,
            dirty: false,
            config,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn session(&self) -> &ScrollSession {
        &self.session
    }

    pub fn load_request(&self, edge: LoadEdge) -> &LoadRequest {
        &self.loads[edge.index()].request
    }

    pub fn pull(&self) -> &PullTracker {
        &self.pull
    }

    pub fn stretch(&self) -> &StretchTracker {
        &self.stretch
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_loading(&self, edge: LoadEdge) -> bool {
        self.loads[edge.index()].is_loading
    }

    /// Loading flag set, or a request still pending, in flight or cooling down.
    pub fn is_busy(&self, edge: LoadEdge) -> bool {
        let load = &self.loads[edge.index()];
        load.is_loading || load.request.is_busy()
    }

    pub(crate) fn edge_mut(&mut self, edge: LoadEdge) -> &mut EdgeLoad {
        &mut self.loads[edge.index()]
    }

    pub(crate) fn owns_loading_flag(&self) -> bool {
        self.config.loading_mode == LoadingMode::Bound
    }

    pub fn view(&self) -> SurfaceViewModel {
        let geometry = self.session.previous_snapshot().unwrap_or_default();
        SurfaceViewModel {
            attached: self.attached,
            enabled: self.config.enabled,
            auto_follow: self.session.auto_follow(),
            offset: self.session.last_known_offset(),
            content_extent: geometry.content_extent(),
            viewport_extent: geometry.viewport_extent(),
            start_loading: self.is_loading(LoadEdge::Start),
            end_loading: self.is_loading(LoadEdge::End),
            start_phase: self.load_request(LoadEdge::Start).phase(),
            end_phase: self.load_request(LoadEdge::End).phase(),
            pull: PullView {
                phase: self.pull.phase(),
                distance: self.pull.distance(),
                progress: self.pull.progress(),
                threshold_reached: self.pull.threshold_reached(),
                is_pulling: self.pull.is_pulling(),
                is_refreshing: self.pull.is_refreshing(),
            },
            stretching_value: self.stretch.stretching_value(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a re-render was requested since the last call, and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
