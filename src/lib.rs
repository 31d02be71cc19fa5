//! # Responsive Value
//! Pick a value by viewport width, the way a stylesheet picks rules by breakpoint.
//!
//! You give a default and a set of candidates keyed by breakpoint label
//! (`xs`, `sm`, `md`, `lg`, `xl`). The candidate of the widest label whose
//! threshold the viewport reaches wins; when no label qualifies the default is used.
//!
//! ## Example: One-shot selection
//! ```rust
//! use responsive_value::prelude::*;
//!
//! let padding = ResponsiveValues::new().sm(8.0).lg(16.0);
//!
//! // 800px is at least `sm` (48em) but narrower than `lg` (75em).
//! assert_eq!(select(4.0, &padding, None, &ViewportWidth::new(800.0)), 8.0);
//! assert_eq!(select(4.0, &padding, None, &ViewportWidth::new(1300.0)), 16.0);
//! assert_eq!(select(4.0, &padding, None, &ViewportWidth::new(400.0)), 4.0);
//! ```
//!
//! ## Breakpoints
//!
//! A threshold means "the viewport is at least this wide", so a wide viewport
//! satisfies every narrower threshold too. Selection walks from `xl` down to `xs`
//! and stops at the first label that both has a candidate and is satisfied.
//! A label without a candidate is skipped, never treated as a match for the default.
//!
//! The default thresholds are
//!
//! | label | threshold | at 16px root font |
//! |-------|-----------|-------------------|
//! | `xs`  | `36em`    | 576px             |
//! | `sm`  | `48em`    | 768px             |
//! | `md`  | `62em`    | 992px             |
//! | `lg`  | `75em`    | 1200px            |
//! | `xl`  | `88em`    | 1408px            |
//!
//! Custom thresholds are passed explicitly as [`Breakpoints`], directly or through a
//! [`ResponsiveConfig`]. There is no global theme to reach into.
//!
//! ## Presence, not truthiness
//!
//! A candidate counts when it is present, whatever its value. `Some(0)`,
//! `Some("")` and `Some(false)` are selected like any other value.
//! [`select_truthy`] reproduces callers that skip falsy candidates, for
//! compatibility only.
//!
//! ## Following the viewport
//!
//! [`Viewport`] is an observable width. [`Responsive`] binds a default and a set
//! of candidates to it and keeps the selection current as the viewport resizes.
//! It watches only the thresholds of labels that carry a candidate, and notifies
//! its listeners only when the selected value changes.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use responsive_value::prelude::*;
//!
//! let viewport = Viewport::new(400.0);
//! let layout = Responsive::new(
//!     &viewport,
//!     "stacked",
//!     ResponsiveValues::new().md("sidebar"),
//!     None,
//! );
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! layout.on_change({
//!     let seen = seen.clone();
//!     move |value| seen.borrow_mut().push(*value)
//! });
//!
//! viewport.resize(1024.0);
//! viewport.resize(1100.0);
//! viewport.resize(500.0);
//!
//! assert_eq!(*seen.borrow(), ["sidebar", "stacked"]);
//! ```

pub mod breakpoint;
pub mod config;
pub mod query;
pub mod responsive;
pub mod select;
pub mod unit;
pub mod values;
pub mod viewport;

pub use dpi;

pub use breakpoint::{Breakpoint, BreakpointFlags, Breakpoints, BreakpointsError};
#[cfg(feature = "serde")]
pub use config::ConfigError;
pub use config::ResponsiveConfig;
pub use query::{MinWidth, QueryError};
pub use responsive::Responsive;
pub use select::{Truthy, resolve, select, select_ref, select_truthy};
pub use unit::{DEFAULT_ROOT_FONT_SIZE, Length, ParseLengthError};
pub use values::ResponsiveValues;
pub use viewport::{
    Subscription, Viewport, ViewportError, ViewportPredicate, ViewportWidth, WatchId,
};

pub mod prelude {
    pub use crate::breakpoint::{Breakpoint, Breakpoints};
    pub use crate::config::ResponsiveConfig;
    pub use crate::responsive::Responsive;
    pub use crate::select::select;
    pub use crate::unit::Length;
    pub use crate::values::ResponsiveValues;
    pub use crate::viewport::{Viewport, ViewportPredicate, ViewportWidth};
}
