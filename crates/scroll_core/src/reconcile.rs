//! Offset correction when content grows underneath the viewport.

use scroll_logging::scroll_debug;

use crate::{GeometrySnapshot, ScrollSession};

/// An offset write to apply before the next paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetCorrection {
    /// Keep the same content pinned under the viewport. Never animated.
    Preserve { offset: f64 },
    /// Follow newly appended content to the trailing edge.
    FollowEnd { offset: f64 },
}

impl OffsetCorrection {
    pub fn offset(&self) -> f64 {
        match *self {
            OffsetCorrection::Preserve { offset } | OffsetCorrection::FollowEnd { offset } => {
                offset
            }
        }
    }
}

/// What the surface was waiting on when the content grew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOrigin {
    /// No load of ours was outstanding; classify by the reader's position.
    Unattributed,
    /// Older content arrived above the reader.
    StartPage,
    /// A page was appended below the reader.
    EndPage,
}

/// Whether the saved position sits within `near_end_viewports` viewports of the old content end.
pub fn is_near_end(
    old_content_extent: f64,
    saved_offset: f64,
    viewport_extent: f64,
    near_end_viewports: f64,
) -> bool {
    let distance_from_end = old_content_extent - saved_offset - viewport_extent;
    distance_from_end <= viewport_extent * near_end_viewports
}

/// Pure policy table for a growth of `new_content_extent - old_content_extent`.
///
/// Returns `None` when content did not grow, or when it grew near the end
/// while the user opted out of auto-follow.
pub fn classify_growth(
    old_content_extent: f64,
    new_content_extent: f64,
    saved_offset: f64,
    viewport_extent: f64,
    auto_follow: bool,
    near_end_viewports: f64,
) -> Option<OffsetCorrection> {
    let delta = new_content_extent - old_content_extent;
    if delta <= 0.0 {
        return None;
    }

    if !is_near_end(
        old_content_extent,
        saved_offset,
        viewport_extent,
        near_end_viewports,
    ) {
        return Some(OffsetCorrection::Preserve {
            offset: saved_offset + delta,
        });
    }

    if auto_follow {
        Some(OffsetCorrection::FollowEnd {
            offset: (new_content_extent - viewport_extent).max(0.0),
        })
    } else {
        None
    }
}

/// Diffs `snapshot` against the session baseline, returns the correction to
/// apply (if any) and records the corrected geometry as the new baseline.
///
/// The first snapshot after mount only establishes the baseline. Growth from
/// a start page always keeps the reader's content pinned; growth from an end
/// page lands below the reader and needs no correction.
pub fn reconcile(
    session: &mut ScrollSession,
    snapshot: GeometrySnapshot,
    near_end_viewports: f64,
    origin: GrowthOrigin,
) -> Option<OffsetCorrection> {
    if session.previous_snapshot.is_none() {
        session.record(snapshot);
        return None;
    }

    let delta = snapshot.content_extent() - session.last_known_content_extent;
    let correction = match origin {
        GrowthOrigin::EndPage => None,
        GrowthOrigin::StartPage if delta > 0.0 => Some(OffsetCorrection::Preserve {
            offset: session.last_known_offset + delta,
        }),
        GrowthOrigin::StartPage | GrowthOrigin::Unattributed => classify_growth(
            session.last_known_content_extent,
            snapshot.content_extent(),
            session.last_known_offset,
            snapshot.viewport_extent(),
            session.auto_follow,
            near_end_viewports,
        ),
    };

    match correction {
        Some(correction) => {
            scroll_debug!(
                "content grew {} -> {}, correcting offset {} -> {:?}",
                session.last_known_content_extent,
                snapshot.content_extent(),
                session.last_known_offset,
                correction
            );
            session.record(snapshot.with_offset(correction.offset()));
        }
        None => session.record(snapshot),
    }
    correction
}
