use scroll_logging::{scroll_debug, scroll_trace, scroll_warn};

use crate::reconcile::{reconcile, GrowthOrigin, OffsetCorrection};
use crate::trigger::{should_trigger_end_load, should_trigger_start_load};
use crate::{
    Effect, GeometrySnapshot, InitialAnchor, LoadEdge, Msg, PullEvent, PullMode, SurfaceState,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SurfaceState, msg: Msg) -> (SurfaceState, Vec<Effect>) {
    if !state.attached && !matches!(msg, Msg::Attach | Msg::NoOp) {
        // Late geometry or task reports after teardown must not resurrect state.
        scroll_trace!("detached surface ignoring {:?}", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Geometry(snapshot) => observe_geometry(&mut state, snapshot),
        Msg::TriggerLoad { edge } => {
            if state.config.enabled && !state.is_busy(edge) {
                begin_load(&mut state, edge)
            } else {
                Vec::new()
            }
        }
        Msg::LoadStarted { edge, generation } => {
            state.edge_mut(edge).request.mark_started(generation);
            Vec::new()
        }
        Msg::LoadFinished { edge, generation } => {
            if !state.edge_mut(edge).request.complete(generation) {
                return (state, Vec::new());
            }
            if state.owns_loading_flag() {
                state.edge_mut(edge).is_loading = false;
            }
            state.mark_dirty();
            vec![Effect::ScheduleCooldown {
                edge,
                generation,
                delay: state.config.cooldown(),
            }]
        }
        Msg::CooldownElapsed { edge, generation } => {
            if state.edge_mut(edge).request.cooldown_elapsed(generation) {
                scroll_trace!("{:?} load re-armed", edge);
            }
            Vec::new()
        }
        Msg::RefreshFinished { generation } => {
            if state.pull.refresh_finished(generation) {
                state.mark_dirty();
                vec![Effect::ScheduleSettle {
                    generation,
                    delay: state.config.settle(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::SettleElapsed { generation } => {
            if state.pull.settle_elapsed(generation) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SetExternalLoading { edge, loading } => {
            if state.owns_loading_flag() {
                scroll_warn!(
                    "external loading flag for {:?} ignored: surface uses bound loading",
                    edge
                );
            } else if state.edge_mut(edge).is_loading != loading {
                state.edge_mut(edge).is_loading = loading;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SetAutoFollow(enabled) => {
            state.session.set_auto_follow(enabled);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SetEnabled(enabled) => {
            state.config.enabled = enabled;
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScrollToEnd { animated } => match state.session.previous_snapshot() {
            Some(snapshot) => {
                let value = snapshot.end_offset();
                state.session.record(snapshot.with_offset(value));
                state.mark_dirty();
                vec![Effect::SetOffset { value, animated }]
            }
            None => Vec::new(),
        },
        Msg::Attach => {
            // Re-attaching under a new identity tears the old session down first.
            let effects = if state.attached {
                detach(&mut state)
            } else {
                Vec::new()
            };
            state.attached = true;
            state.session.reset();
            state.mark_dirty();
            effects
        }
        Msg::Detach => detach(&mut state),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn observe_geometry(state: &mut SurfaceState, snapshot: GeometrySnapshot) -> Vec<Effect> {
    let mut effects = Vec::new();
    let origin = growth_origin(state);

    let effective = match initial_anchor(state, snapshot) {
        Some(anchored) => {
            effects.push(Effect::SetOffset {
                value: anchored.offset(),
                animated: false,
            });
            anchored
        }
        None => match reconcile(
            &mut state.session,
            snapshot,
            state.config.near_end_viewports,
            origin,
        ) {
            Some(correction) => {
                let animated = matches!(correction, OffsetCorrection::FollowEnd { .. })
                    && state.config.animate_follow;
                effects.push(Effect::SetOffset {
                    value: correction.offset(),
                    animated,
                });
                snapshot.with_offset(correction.offset())
            }
            None => snapshot,
        },
    };
    state.mark_dirty();

    observe_pull(state, &effective, &mut effects);

    if state.config.start_loading {
        let busy = !state.config.enabled || state.is_busy(LoadEdge::Start);
        if should_trigger_start_load(
            &mut state.session,
            effective.offset(),
            effective.viewport_extent(),
            state.config.start_leading_screens,
            busy,
        ) {
            effects.extend(begin_load(state, LoadEdge::Start));
        }
    }

    if state.config.end_loading && state.config.enabled {
        let busy = state.is_busy(LoadEdge::End);
        if should_trigger_end_load(&effective, state.config.end_leading_screens, busy) {
            effects.extend(begin_load(state, LoadEdge::End));
        }
    }

    effects
}

/// Attributes growth to whichever edge has a load outstanding. Pending,
/// in-flight and cooling-down requests all count, since hosts may lay out the
/// new page after the completion report.
fn growth_origin(state: &SurfaceState) -> GrowthOrigin {
    match (state.is_busy(LoadEdge::Start), state.is_busy(LoadEdge::End)) {
        (true, false) => GrowthOrigin::StartPage,
        (false, true) => GrowthOrigin::EndPage,
        _ => GrowthOrigin::Unattributed,
    }
}

/// Jumps a freshly mounted end-anchored surface to its trailing edge the first
/// time content overflows the viewport.
fn initial_anchor(state: &mut SurfaceState, snapshot: GeometrySnapshot) -> Option<GeometrySnapshot> {
    if state.session.anchored || !snapshot.is_measured() {
        return None;
    }
    match state.config.initial_anchor {
        InitialAnchor::Start => {
            state.session.anchored = true;
            None
        }
        InitialAnchor::End => {
            if snapshot.content_extent() <= snapshot.viewport_extent() {
                return None;
            }
            state.session.anchored = true;
            let anchored = snapshot.with_offset(snapshot.end_offset());
            scroll_debug!("initial anchor to end offset={}", anchored.offset());
            state.session.record(anchored);
            state.session.previous_offset_along_axis = Some(anchored.offset());
            Some(anchored)
        }
    }
}

fn observe_pull(state: &mut SurfaceState, snapshot: &GeometrySnapshot, effects: &mut Vec<Effect>) {
    let overscroll = snapshot.leading_overscroll();
    match state.config.pull_mode {
        PullMode::Off => {}
        PullMode::Stretch => {
            state.stretch.observe(overscroll);
        }
        PullMode::Refresh => {
            if !state.config.enabled {
                return;
            }
            if let Some(PullEvent::RefreshTriggered { generation }) = state.pull.observe(overscroll)
            {
                effects.push(Effect::StartRefresh { generation });
            }
        }
    }
}

fn begin_load(state: &mut SurfaceState, edge: LoadEdge) -> Vec<Effect> {
    let owns_flag = state.owns_loading_flag();
    let load = state.edge_mut(edge);
    let Some(generation) = load.request.begin() else {
        return Vec::new();
    };
    if owns_flag {
        load.is_loading = true;
    }
    state.mark_dirty();
    scroll_debug!("{:?} load triggered generation={}", edge, generation.value());
    vec![Effect::StartLoad { edge, generation }]
}

fn detach(state: &mut SurfaceState) -> Vec<Effect> {
    let owns_flag = state.owns_loading_flag();
    for edge in [LoadEdge::Start, LoadEdge::End] {
        let load = state.edge_mut(edge);
        load.request.cancel();
        if owns_flag {
            load.is_loading = false;
        }
    }
    state.pull.cancel();
    state.stretch.reset();
    state.session.reset();
    state.attached = false;
    state.mark_dirty();
    scroll_debug!("surface detached");
    vec![Effect::CancelPending]
}
