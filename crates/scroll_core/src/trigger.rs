//! Trigger decisions derived from the geometry stream.
//!
//! Both policies are pure: they never start a load themselves, they only say
//! whether one should start now. The caller owns the busy state.

use scroll_logging::scroll_trace;

use crate::{GeometrySnapshot, ScrollSession};

/// Decides whether the trailing edge is close enough to load more content.
///
/// Content that does not yet fill the viewport while sitting at offset zero
/// always triggers, so an initially short list populates itself.
pub fn should_trigger_end_load(
    snapshot: &GeometrySnapshot,
    leading_screens: f64,
    is_loading: bool,
) -> bool {
    if is_loading {
        return false;
    }
    if !snapshot.is_measured() {
        return false;
    }

    let trigger_distance = snapshot.viewport_extent() * leading_screens.max(0.0);
    let small_content =
        snapshot.offset() == 0.0 && snapshot.content_extent() < snapshot.viewport_extent();

    small_content || snapshot.remaining_to_end() <= trigger_distance
}

/// Motion along the scroll axis relative to the previous sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMotion {
    /// First sample after mount; no direction yet.
    Unknown,
    Still,
    TowardStart,
    TowardEnd,
}

/// Records `offset` as the new direction baseline and reports the motion.
pub fn observe_motion(session: &mut ScrollSession, offset: f64) -> ScrollMotion {
    let motion = match session.previous_offset_along_axis {
        None => ScrollMotion::Unknown,
        Some(previous) if offset < previous => ScrollMotion::TowardStart,
        Some(previous) if offset > previous => ScrollMotion::TowardEnd,
        Some(_) => ScrollMotion::Still,
    };
    session.previous_offset_along_axis = Some(offset);
    motion
}

/// Direction-gated check for loading older content at the leading edge.
///
/// Only fires while the user is moving toward the start, so a bounce-back or
/// a preservation correction after a prepend never re-triggers on its own.
/// The direction baseline is updated on every call, busy or not.
pub fn should_trigger_start_load(
    session: &mut ScrollSession,
    offset: f64,
    viewport_extent: f64,
    leading_screens: f64,
    load_busy: bool,
) -> bool {
    let motion = observe_motion(session, offset);
    if motion != ScrollMotion::TowardStart {
        scroll_trace!("start trigger skipped: motion={:?} offset={}", motion, offset);
        return false;
    }
    if load_busy || viewport_extent <= 0.0 {
        return false;
    }
    offset <= viewport_extent * leading_screens.max(0.0)
}
