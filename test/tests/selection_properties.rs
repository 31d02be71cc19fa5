//! Properties of one-shot selection across the whole width range.
//!
//! These tests verify that:
//! - Widths narrower than `xs` always produce the default
//! - `xl` wins whenever it is present and reached
//! - The selected label never moves to a narrower one as the width grows
//! - Absent labels fall through to the next narrower present label
//! - Repeated selection is stable

use responsive_value_test::prelude::*;

fn label_rank(value: &str) -> usize {
    match value {
        "default" => 0,
        "xs" => 1,
        "sm" => 2,
        "md" => 3,
        "lg" => 4,
        "xl" => 5,
        other => panic!("unexpected value {other}"),
    }
}

fn all_subsets() -> Vec<ResponsiveValues<&'static str>> {
    (0u8..32)
        .map(|mask| {
            Breakpoint::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, bp)| (bp, <&'static str>::from(bp)))
                .collect()
        })
        .collect()
}

#[test]
fn narrower_than_xs_is_always_default() {
    let widths = widths_between(0.0, 576.0, 12.5);
    for values in all_subsets() {
        for picked in select_across("default", &values, widths.iter().copied()) {
            assert_eq!(picked, "default", "values {values:?}");
        }
    }
}

#[test]
fn xl_wins_when_present() {
    for values in all_subsets().into_iter().filter(|v| v.xl.is_some()) {
        for picked in select_across("default", &values, [1408.0, 1600.0, 3840.0]) {
            assert_eq!(picked, "xl", "values {values:?}");
        }
    }
}

#[test]
fn selection_never_regresses_as_width_grows() {
    let widths = widths_between(0.0, 2000.0, 4.0);
    for values in all_subsets() {
        let picks = select_across("default", &values, widths.iter().copied());
        for pair in picks.windows(2) {
            assert!(
                label_rank(pair[1]) >= label_rank(pair[0]),
                "regressed from {} to {} with {values:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn absent_label_falls_through() {
    let values = ResponsiveValues::new().lg("lg");
    assert_eq!(select_across("default", &values, [1500.0]), ["lg"]);

    let values = ResponsiveValues::new().xs("xs").md("md");
    assert_eq!(
        select_across("default", &values, [600.0, 800.0, 1000.0, 1300.0, 1500.0]),
        ["xs", "xs", "md", "md", "md"]
    );
}

#[test]
fn thresholds_are_inclusive() {
    let values = ResponsiveValues::new()
        .xs("xs")
        .sm("sm")
        .md("md")
        .lg("lg")
        .xl("xl");
    let boundaries = boundary_widths(&Breakpoints::default(), 16.0);

    let mut expected_below = "default";
    for ((below, at), bp) in boundaries.into_iter().zip(Breakpoint::ALL) {
        assert_eq!(select_across("default", &values, [below]), [expected_below]);
        let label: &'static str = bp.into();
        assert_eq!(select_across("default", &values, [at]), [label]);
        expected_below = label;
    }
}

#[test]
fn repeated_selection_is_stable() {
    let values = ResponsiveValues::new().sm("sm").xl("xl");
    let viewport = ViewportWidth::new(900.0);
    let first = select("default", &values, None, &viewport);
    for _ in 0..10 {
        assert_eq!(select("default", &values, None, &viewport), first);
    }
}

#[test]
fn tablet_desktop_scenario() {
    let values = ResponsiveValues::new().sm("tablet").lg("desktop");
    assert_eq!(
        select_across("base", &values, [800.0, 1300.0, 400.0]),
        ["tablet", "desktop", "base"]
    );
}

#[test]
fn falsy_values_are_selected_unless_asked_otherwise() {
    let values = ResponsiveValues::new().xs(16).md(0);
    let desktop = ViewportWidth::new(1024.0);
    assert_eq!(select(8, &values, None, &desktop), 0);
    assert_eq!(select_truthy(8, &values, None, &desktop), 16);

    let hidden = ResponsiveValues::new().lg(false);
    assert!(!select(true, &hidden, None, &ViewportWidth::new(1250.0)));
    assert!(select_truthy(true, &hidden, None, &ViewportWidth::new(1250.0)));
}

#[test]
fn query_expressions_at_the_boundary() {
    let viewport = ViewportWidth::new(768.0);
    assert_eq!(viewport.matches_expr("(min-width: 48em)"), Ok(true));
    assert_eq!(viewport.matches_expr("(min-width: 769px)"), Ok(false));
}
