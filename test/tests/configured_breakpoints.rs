//! Tests for breakpoints that come from a configuration file.
//!
//! These tests verify that:
//! - Labels left out of the configuration keep their default thresholds
//! - A configured root font size reaches the viewport
//! - Invalid configurations are rejected before any value is built

use responsive_value::{BreakpointsError, ConfigError, Length};
use responsive_value_test::prelude::*;

const CONFIG: &str = r#"{
    "breakpoints": { "sm": "40em", "lg": "1100px" },
    "root_font_size": 16
}"#;

#[test]
fn partial_configuration_keeps_default_labels() {
    let config = ResponsiveConfig::from_json_str(CONFIG).unwrap();
    let defaults = Breakpoints::default();

    assert_eq!(config.breakpoints.get(Breakpoint::Sm), Length::em(40.0));
    assert_eq!(config.breakpoints.get(Breakpoint::Lg), Length::px(1100.0));
    assert_eq!(
        config.breakpoints.get(Breakpoint::Xs),
        defaults.get(Breakpoint::Xs)
    );
    assert_eq!(
        config.breakpoints.get(Breakpoint::Xl),
        defaults.get(Breakpoint::Xl)
    );
}

#[test]
fn configured_value_follows_the_viewport() {
    let config = ResponsiveConfig::from_json_str(CONFIG).unwrap();
    let viewport = Viewport::with_config(600.0, &config).unwrap();
    let layout = Responsive::from_config(
        &viewport,
        &config,
        "stacked",
        ResponsiveValues::new().sm("split").lg("wide"),
    );
    assert_eq!(layout.get(), "stacked");

    // 40em is 640px, below the default 48em.
    viewport.resize(640.0);
    assert_eq!(layout.get(), "split");

    viewport.resize(1100.0);
    assert_eq!(layout.get(), "wide");
}

#[test]
fn configured_root_font_size_reaches_the_viewport() {
    let config = ResponsiveConfig::from_json_str(r#"{ "root_font_size": 20 }"#).unwrap();
    let viewport = Viewport::with_config(900.0, &config).unwrap();
    assert_eq!(viewport.root_font_size(), 20.0);

    // 48em at 20px is 960px.
    let value = Responsive::from_config(&viewport, &config, 0, ResponsiveValues::new().sm(1));
    assert_eq!(value.get(), 0);
    viewport.resize(960.0);
    assert_eq!(value.get(), 1);
}

#[test]
fn configuration_loads_from_a_file() {
    let path = std::env::temp_dir().join(format!(
        "responsive_value_config_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, CONFIG).unwrap();
    let loaded = ResponsiveConfig::load(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.unwrap(), ResponsiveConfig::from_json_str(CONFIG).unwrap());
}

#[test]
fn invalid_configurations_are_rejected() {
    let out_of_order = r#"{ "breakpoints": { "sm": "20em" } }"#;
    assert!(matches!(
        ResponsiveConfig::from_json_str(out_of_order),
        Err(ConfigError::Json(_))
    ));

    let unknown_label = r#"{ "breakpoints": { "xxl": "100em" } }"#;
    assert!(ResponsiveConfig::from_json_str(unknown_label).is_err());

    let bad_font = r#"{ "root_font_size": 0 }"#;
    assert!(matches!(
        ResponsiveConfig::from_json_str(bad_font),
        Err(ConfigError::InvalidRootFontSize(_))
    ));

    // 700px is above sm at 16px, but at 10px sm (48em) is only 480px.
    let mixed = r#"{ "breakpoints": { "xs": "700px" }, "root_font_size": 10 }"#;
    assert!(matches!(
        ResponsiveConfig::from_json_str(mixed),
        Err(ConfigError::Breakpoints {
            source: BreakpointsError::NotIncreasing {
                lower: Breakpoint::Xs,
                upper: Breakpoint::Sm,
                ..
            },
            ..
        })
    ));
    let at_default_size = r#"{ "breakpoints": { "xs": "700px" } }"#;
    assert!(ResponsiveConfig::from_json_str(at_default_size).is_ok());

    assert!(matches!(
        ResponsiveConfig::load("/nonexistent/responsive.json"),
        Err(ConfigError::Io(_))
    ));
}
