use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scroll_core::{
    update, Effect, Generation, GeometrySnapshot, LoadEdge, LoadPhase, Msg, ScrollConfig,
    SurfaceState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scroll_logging::initialize_for_tests);
}

fn near_end(state: SurfaceState) -> (SurfaceState, Vec<Effect>) {
    update(
        state,
        Msg::Geometry(GeometrySnapshot::new(0.0, 100.0, 100.0)),
    )
}

#[test]
fn bound_load_walks_every_phase() {
    init_logging();
    let edge = LoadEdge::End;
    let generation = Generation::new(1);

    let (state, effects) = near_end(SurfaceState::default());
    assert_eq!(effects, vec![Effect::StartLoad { edge, generation }]);
    let view = state.view();
    assert!(view.end_loading);
    assert_eq!(view.end_phase, LoadPhase::Pending);

    let (state, _) = update(state, Msg::LoadStarted { edge, generation });
    assert_eq!(state.view().end_phase, LoadPhase::InFlight);

    let (state, effects) = update(state, Msg::LoadFinished { edge, generation });
    assert_eq!(
        effects,
        vec![Effect::ScheduleCooldown {
            edge,
            generation,
            delay: Duration::from_millis(100),
        }]
    );
    let view = state.view();
    assert!(!view.end_loading);
    assert_eq!(view.end_phase, LoadPhase::CoolingDown);

    // Layout settling after the mutation must not re-fire during cooldown.
    let (state, effects) = near_end(state);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::CooldownElapsed { edge, generation });
    assert_eq!(state.view().end_phase, LoadPhase::Idle);

    let (_state, effects) = near_end(state);
    assert_eq!(
        effects,
        vec![Effect::StartLoad {
            edge,
            generation: Generation::new(2),
        }]
    );
}

#[test]
fn completion_after_teardown_stays_idle() {
    init_logging();
    let edge = LoadEdge::End;
    let generation = Generation::new(1);

    let (state, _) = near_end(SurfaceState::default());
    let (state, _) = update(state, Msg::LoadStarted { edge, generation });
    let (state, effects) = update(state, Msg::Detach);
    assert_eq!(effects, vec![Effect::CancelPending]);
    assert_eq!(state.load_request(edge).phase(), LoadPhase::Idle);
    assert!(!state.is_loading(edge));

    let (state, effects) = update(state, Msg::LoadFinished { edge, generation });
    assert!(effects.is_empty());
    assert_eq!(state.load_request(edge).phase(), LoadPhase::Idle);

    // Even after remounting, the old task's report stays stale.
    let (state, _) = update(state, Msg::Attach);
    let (state, effects) = update(state, Msg::LoadFinished { edge, generation });
    assert!(effects.is_empty());
    assert_eq!(state.load_request(edge).phase(), LoadPhase::Idle);
    assert!(state.is_attached());
}

#[test]
fn stale_cooldown_does_not_rearm_a_newer_load() {
    let edge = LoadEdge::End;
    let (state, _) = near_end(SurfaceState::default());
    let (state, _) = update(state, Msg::Detach);
    let (state, _) = update(state, Msg::Attach);
    let (state, effects) = near_end(state);
    let current = match effects.as_slice() {
        [Effect::StartLoad { generation, .. }] => *generation,
        other => panic!("unexpected effects {other:?}"),
    };
    assert_ne!(current, Generation::new(1));

    let (state, _) = update(
        state,
        Msg::CooldownElapsed {
            edge,
            generation: Generation::new(1),
        },
    );
    assert_eq!(state.load_request(edge).phase(), LoadPhase::Pending);
}

#[test]
fn reattach_resets_observation_history() {
    let (state, _) = near_end(SurfaceState::default());
    assert!(state.session().previous_snapshot().is_some());

    let (state, effects) = update(state, Msg::Attach);
    assert_eq!(effects, vec![Effect::CancelPending]);
    assert!(state.session().previous_snapshot().is_none());
    assert!(state.is_attached());
}

#[test]
fn edges_are_independent() {
    let config = ScrollConfig {
        start_loading: true,
        ..ScrollConfig::default()
    };
    let (state, _) = update(
        SurfaceState::new(config),
        Msg::TriggerLoad {
            edge: LoadEdge::End,
        },
    );
    let (state, effects) = update(
        state,
        Msg::TriggerLoad {
            edge: LoadEdge::Start,
        },
    );

    assert_eq!(
        effects,
        vec![Effect::StartLoad {
            edge: LoadEdge::Start,
            generation: Generation::new(1),
        }]
    );
    assert!(state.is_busy(LoadEdge::End));
    assert!(state.is_busy(LoadEdge::Start));
}

#[test]
fn dirty_flag_is_consumed_once() {
    let (mut state, _) = near_end(SurfaceState::default());
    assert!(state.view().dirty);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}
