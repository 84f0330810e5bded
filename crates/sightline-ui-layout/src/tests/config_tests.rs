use crate::{ColumnBreakpoints, ColumnStep, ConfigError, GridConfig};

#[test]
fn default_config_is_valid() {
    let config = GridConfig::default();
    assert_eq!(config.gap, 16.0);
    assert_eq!(config.overscan_rows, 2);
    assert_eq!(config.fallback_threshold, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn rejects_non_positive_aspect_ratio() {
    for aspect_ratio in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let config = GridConfig::default().with_aspect_ratio(aspect_ratio);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveAspectRatio { .. })
        ));
    }
}

#[test]
fn rejects_negative_gap() {
    let config = GridConfig::default().with_gap(-4.0);
    assert_eq!(config.validate(), Err(ConfigError::InvalidGap { gap: -4.0 }));
}

#[test]
fn rejects_bad_breakpoints() {
    let config = GridConfig::default().with_breakpoints(ColumnBreakpoints::from_steps([
        ColumnStep::new(0.0, 2),
        ColumnStep::new(0.0, 3),
    ]));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::UnorderedBreakpoints { .. })
    ));
}

#[test]
fn error_messages_name_the_offending_value() {
    let message = ConfigError::InvalidGap { gap: -2.0 }.to_string();
    assert!(message.contains("-2"), "{message}");
    let message = ConfigError::ZeroColumns { min_width: 640.0 }.to_string();
    assert!(message.contains("640"), "{message}");
}
