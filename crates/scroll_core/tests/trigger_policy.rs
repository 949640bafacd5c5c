use std::sync::Once;

use pretty_assertions::assert_eq;
use scroll_core::{
    should_trigger_end_load, should_trigger_start_load, update, Effect, Generation,
    GeometrySnapshot, LoadEdge, LoadingMode, Msg, ScrollConfig, ScrollSession, SurfaceState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scroll_logging::initialize_for_tests);
}

fn geometry(
    state: SurfaceState,
    offset: f64,
    content: f64,
    viewport: f64,
) -> (SurfaceState, Vec<Effect>) {
    update(
        state,
        Msg::Geometry(GeometrySnapshot::new(offset, content, viewport)),
    )
}

fn start_loading_config() -> ScrollConfig {
    ScrollConfig {
        end_loading: false,
        start_loading: true,
        start_leading_screens: 1.0,
        ..ScrollConfig::default()
    }
}

#[test]
fn repeated_near_end_snapshots_trigger_once() {
    init_logging();
    let mut state = SurfaceState::default();
    let mut starts = 0;
    for _ in 0..5 {
        let (next, effects) = geometry(state, 0.0, 100.0, 100.0);
        starts += effects
            .iter()
            .filter(|effect| matches!(effect, Effect::StartLoad { .. }))
            .count();
        state = next;
    }

    assert_eq!(starts, 1);
    assert!(state.is_loading(LoadEdge::End));
}

#[test]
fn end_trigger_respects_loading_flag() {
    let snapshot = GeometrySnapshot::new(0.0, 100.0, 100.0);
    assert!(should_trigger_end_load(&snapshot, 2.0, false));
    assert!(!should_trigger_end_load(&snapshot, 2.0, true));
}

#[test]
fn small_content_triggers_regardless_of_leading_screens() {
    let snapshot = GeometrySnapshot::new(0.0, 50.0, 400.0);
    assert!(should_trigger_end_load(&snapshot, 0.0, false));
    assert!(should_trigger_end_load(&snapshot, 2.0, false));
}

#[test]
fn unmeasured_viewport_is_not_a_trigger() {
    let snapshot = GeometrySnapshot::new(0.0, 0.0, 0.0);
    assert!(!should_trigger_end_load(&snapshot, 0.0, false));
    assert!(!should_trigger_end_load(&snapshot, 2.0, false));
}

#[test]
fn start_trigger_needs_known_direction() {
    let mut session = ScrollSession::default();
    assert!(!should_trigger_start_load(&mut session, 300.0, 200.0, 1.0, false));
    assert!(!should_trigger_start_load(&mut session, 300.0, 200.0, 1.0, false));
    assert!(should_trigger_start_load(&mut session, 150.0, 200.0, 1.0, false));
}

#[test]
fn start_trigger_ignores_scrolling_toward_end_near_top() {
    let mut session = ScrollSession::default();
    assert!(!should_trigger_start_load(&mut session, 50.0, 200.0, 1.0, false));
    assert!(!should_trigger_start_load(&mut session, 60.0, 200.0, 1.0, false));
}

#[test]
fn start_load_fires_on_third_sample_through_update() {
    init_logging();
    let state = SurfaceState::new(start_loading_config());

    let (state, effects) = geometry(state, 300.0, 2000.0, 200.0);
    assert!(effects.is_empty());
    let (state, effects) = geometry(state, 300.0, 2000.0, 200.0);
    assert!(effects.is_empty());
    let (state, effects) = geometry(state, 150.0, 2000.0, 200.0);

    assert_eq!(
        effects,
        vec![Effect::StartLoad {
            edge: LoadEdge::Start,
            generation: Generation::new(1),
        }]
    );
    assert!(state.is_loading(LoadEdge::Start));
}

#[test]
fn preservation_after_prepend_does_not_retrigger() {
    init_logging();
    let state = SurfaceState::new(start_loading_config());
    let (state, _) = geometry(state, 300.0, 2000.0, 200.0);
    let (state, effects) = geometry(state, 150.0, 2000.0, 200.0);
    let generation = match effects.as_slice() {
        [Effect::StartLoad { generation, .. }] => *generation,
        other => panic!("unexpected effects {other:?}"),
    };

    let edge = LoadEdge::Start;
    let (state, _) = update(state, Msg::LoadStarted { edge, generation });
    let (state, _) = update(state, Msg::LoadFinished { edge, generation });
    let (state, _) = update(state, Msg::CooldownElapsed { edge, generation });

    // 600 units of history prepended while the user sat at 150.
    let (state, effects) = geometry(state, 150.0, 2600.0, 200.0);
    assert_eq!(
        effects,
        vec![Effect::SetOffset {
            value: 750.0,
            animated: false,
        }]
    );
    assert!(!state.is_busy(edge));

    // The platform echoes the corrected offset; still no new trigger.
    let (_state, effects) = geometry(state, 750.0, 2600.0, 200.0);
    assert!(effects.is_empty());
}

#[test]
fn events_during_flight_update_direction_but_do_not_trigger() {
    init_logging();
    let state = SurfaceState::new(start_loading_config());
    let (state, _) = geometry(state, 300.0, 2000.0, 200.0);
    let (state, effects) = geometry(state, 150.0, 2000.0, 200.0);
    assert_eq!(effects.len(), 1);

    let (state, effects) = geometry(state, 100.0, 2000.0, 200.0);
    assert!(effects.is_empty());
    assert_eq!(state.session().previous_offset_along_axis(), Some(100.0));
}

#[test]
fn manual_trigger_is_idempotent_while_busy() {
    init_logging();
    let state = SurfaceState::default();
    let edge = LoadEdge::End;
    let (state, first) = update(state, Msg::TriggerLoad { edge });
    let (_state, second) = update(state, Msg::TriggerLoad { edge });

    assert_eq!(
        first,
        vec![Effect::StartLoad {
            edge,
            generation: Generation::new(1),
        }]
    );
    assert!(second.is_empty());
}

#[test]
fn disabled_surface_never_triggers() {
    init_logging();
    let (state, _) = update(SurfaceState::default(), Msg::SetEnabled(false));
    let (state, effects) = geometry(state, 0.0, 100.0, 100.0);
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::TriggerLoad {
            edge: LoadEdge::End,
        },
    );
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::SetEnabled(true));
    let (_state, effects) = geometry(state, 0.0, 100.0, 100.0);
    assert_eq!(effects.len(), 1);
}

#[test]
fn external_loading_flag_is_read_not_written() {
    init_logging();
    let config = ScrollConfig {
        loading_mode: LoadingMode::External,
        ..ScrollConfig::default()
    };
    let edge = LoadEdge::End;
    let (state, effects) = geometry(SurfaceState::new(config), 0.0, 100.0, 100.0);
    let generation = match effects.as_slice() {
        [Effect::StartLoad { generation, .. }] => *generation,
        other => panic!("unexpected effects {other:?}"),
    };
    assert!(!state.is_loading(edge));

    let (state, _) = update(state, Msg::SetExternalLoading { edge, loading: true });
    let (state, _) = update(state, Msg::LoadFinished { edge, generation });
    assert!(state.is_loading(edge));
    let (state, _) = update(state, Msg::CooldownElapsed { edge, generation });

    let (state, effects) = geometry(state, 0.0, 100.0, 100.0);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::SetExternalLoading { edge, loading: false });
    let (_state, effects) = geometry(state, 0.0, 100.0, 100.0);
    assert_eq!(
        effects,
        vec![Effect::StartLoad {
            edge,
            generation: Generation::new(2),
        }]
    );
}

#[test]
fn bound_mode_ignores_external_flag() {
    let edge = LoadEdge::End;
    let (state, _) = update(
        SurfaceState::default(),
        Msg::SetExternalLoading { edge, loading: true },
    );
    assert!(!state.is_loading(edge));
}
