use crate::GeometrySnapshot;

/// Mutable observation state of one mounted scroll surface.
///
/// Lives from mount to unmount; [`ScrollSession::reset`] runs whenever the
/// surface is detached so a reattached surface never diffs against geometry
/// from its previous life.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollSession {
    pub(crate) previous_snapshot: Option<GeometrySnapshot>,
    pub(crate) previous_offset_along_axis: Option<f64>,
    pub(crate) last_known_offset: f64,
    pub(crate) last_known_content_extent: f64,
    pub(crate) auto_follow: bool,
    pub(crate) anchored: bool,
}

impl ScrollSession {
    pub fn new(auto_follow: bool) -> Self {
        Self {
            auto_follow,
            ..Self::default()
        }
    }

    pub fn previous_snapshot(&self) -> Option<GeometrySnapshot> {
        self.previous_snapshot
    }

    pub fn previous_offset_along_axis(&self) -> Option<f64> {
        self.previous_offset_along_axis
    }

    pub fn last_known_offset(&self) -> f64 {
        self.last_known_offset
    }

    pub fn last_known_content_extent(&self) -> f64 {
        self.last_known_content_extent
    }

    pub fn auto_follow(&self) -> bool {
        self.auto_follow
    }

    pub fn set_auto_follow(&mut self, enabled: bool) {
        self.auto_follow = enabled;
    }

    /// Records an observed (or corrected) snapshot as the new baseline.
    pub(crate) fn record(&mut self, snapshot: GeometrySnapshot) {
        self.previous_snapshot = Some(snapshot);
        self.last_known_offset = snapshot.offset();
        self.last_known_content_extent = snapshot.content_extent();
    }

    /// Clears all observation history; the auto-follow preference survives.
    pub fn reset(&mut self) {
        *self = Self::new(self.auto_follow);
    }
}
