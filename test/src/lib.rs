//! Testing utilities for responsive values.
//!
//! Helpers for driving a [`Viewport`] through widths and recording what a
//! [`Responsive`] value or a raw width watch did along the way.
//!
//! # Example
//!
//! ```rust
//! use responsive_value_test::prelude::*;
//!
//! let viewport = Viewport::new(400.0);
//! let columns = Responsive::new(&viewport, 1, ResponsiveValues::new().md(3), None);
//!
//! let tracker = ChangeTracker::new();
//! tracker.track(&columns);
//!
//! viewport.resize(1000.0);
//! viewport.resize(1100.0);
//!
//! assert_eq!(tracker.changes(), vec![3]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use responsive_value::{
    Breakpoint, Breakpoints, MinWidth, Responsive, ResponsiveValues, Subscription, Viewport,
    ViewportWidth, select,
};

/// Prelude module for convenient imports in tests.
pub mod prelude {
    pub use super::{
        ChangeTracker, WatchRecorder, boundary_widths, select_across, sweep, widths_between,
    };
    pub use responsive_value::prelude::*;
    pub use responsive_value::{Breakpoint, BreakpointFlags, MinWidth, select_truthy};
}

/// Records every value a [`Responsive`] reports through `on_change`.
///
/// # Example
///
/// ```rust,ignore
/// let tracker = ChangeTracker::new();
/// tracker.track(&value);
/// // ... resize the viewport ...
/// assert_eq!(tracker.change_count(), 2);
/// ```
#[derive(Clone)]
pub struct ChangeTracker<T> {
    changes: Rc<RefCell<Vec<T>>>,
}

impl<T> Default for ChangeTracker<T> {
    fn default() -> Self {
        Self {
            changes: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ChangeTracker<T> {
    /// Create a new change tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording the changes of `value`.
    pub fn track(&self, value: &Responsive<T>) {
        let changes = self.changes.clone();
        value.on_change(move |v| changes.borrow_mut().push(v.clone()));
    }

    /// Returns the recorded values in order.
    pub fn changes(&self) -> Vec<T> {
        self.changes.borrow().clone()
    }

    /// Returns the number of changes recorded.
    pub fn change_count(&self) -> usize {
        self.changes.borrow().len()
    }

    /// Returns the most recent change.
    pub fn last(&self) -> Option<T> {
        self.changes.borrow().last().cloned()
    }

    /// Reset the tracker, clearing all recorded changes.
    pub fn reset(&self) {
        self.changes.borrow_mut().clear();
    }
}

/// Watches named width queries on a viewport and records each flip.
///
/// The recorder owns its subscriptions; dropping it removes the watches.
#[derive(Default)]
pub struct WatchRecorder {
    flips: Rc<RefCell<Vec<(String, bool)>>>,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl WatchRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `query` on `viewport`, recording flips under `name`.
    pub fn watch(&self, viewport: &Viewport, name: &str, query: MinWidth) {
        let flips = self.flips.clone();
        let name = name.to_string();
        let subscription = viewport.watch(query, move |matched| {
            flips.borrow_mut().push((name.clone(), matched));
        });
        self.subscriptions.borrow_mut().push(subscription);
    }

    /// Watch every breakpoint threshold of `breakpoints`, named by label.
    pub fn watch_breakpoints(&self, viewport: &Viewport, breakpoints: &Breakpoints) {
        for bp in Breakpoint::ALL {
            self.watch(viewport, &bp.to_string(), breakpoints.query(bp));
        }
    }

    /// Returns the recorded flips in order.
    pub fn flips(&self) -> Vec<(String, bool)> {
        self.flips.borrow().clone()
    }

    /// Returns the flips recorded for `name`.
    pub fn flips_of(&self, name: &str) -> Vec<bool> {
        self.flips
            .borrow()
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, matched)| *matched)
            .collect()
    }

    /// Reset the recorder, clearing the recorded flips but keeping the watches.
    pub fn reset(&self) {
        self.flips.borrow_mut().clear();
    }
}

/// Resize `viewport` through `widths`, reading `value` after each step.
pub fn sweep<T: Clone + PartialEq + 'static>(
    viewport: &Viewport,
    value: &Responsive<T>,
    widths: impl IntoIterator<Item = f64>,
) -> Vec<T> {
    widths
        .into_iter()
        .map(|width| {
            viewport.resize(width);
            value.get()
        })
        .collect()
}

/// One-shot [`select`] at each of `widths`, with the default breakpoints.
pub fn select_across<T: Clone>(
    default: T,
    values: &ResponsiveValues<T>,
    widths: impl IntoIterator<Item = f64>,
) -> Vec<T> {
    widths
        .into_iter()
        .map(|width| select(default.clone(), values, None, &ViewportWidth::new(width)))
        .collect()
}

/// Each threshold of `breakpoints` in pixels, paired with the width just
/// below it, narrowest first.
pub fn boundary_widths(breakpoints: &Breakpoints, root_font_size: f64) -> Vec<(f64, f64)> {
    breakpoints
        .iter()
        .map(|(_, length)| {
            let px = length.to_px(root_font_size);
            (px - 0.5, px)
        })
        .collect()
}

/// Widths from `start` up to, but not including, `end` in `step` increments.
pub fn widths_between(start: f64, end: f64, step: f64) -> Vec<f64> {
    assert!(step > 0.0, "step must be positive");
    let mut widths = Vec::new();
    let mut width = start;
    while width < end {
        widths.push(width);
        width += step;
    }
    widths
}
