use scroll_core::{ConfigError, InitialAnchor, LoadingMode, PullMode, ScrollConfig};

#[test]
fn defaults_match_documented_values() {
    let config = ScrollConfig::default();
    assert!(config.enabled);
    assert_eq!(config.end_leading_screens, 2.0);
    assert_eq!(config.start_leading_screens, 1.0);
    assert_eq!(config.pull_threshold, 80.0);
    assert_eq!(config.loading_mode, LoadingMode::Bound);
    assert_eq!(config.pull_mode, PullMode::Off);
    assert_eq!(config.cooldown_ms, 100);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn message_list_preset_loads_history_from_the_end() {
    let config = ScrollConfig::message_list();
    assert!(config.start_loading);
    assert!(!config.end_loading);
    assert_eq!(config.initial_anchor, InitialAnchor::End);
}

#[test]
fn validation_rejects_bad_values() {
    let config = ScrollConfig {
        end_leading_screens: -1.0,
        ..ScrollConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NegativeLeadingScreens(-1.0))
    );

    let config = ScrollConfig {
        pull_threshold: 0.0,
        ..ScrollConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::NonPositiveThreshold(0.0)));

    let config = ScrollConfig {
        near_end_viewports: 0.0,
        ..ScrollConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::NonPositiveNearEnd(0.0)));
}
