//! The viewport boundary.
//!
//! [`ViewportPredicate`] is all selection needs: "does the viewport satisfy this
//! width query right now". [`ViewportWidth`] answers it for a fixed width, and
//! [`Viewport`] is the observable version that tells watchers when the answer
//! to their query flips.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use dpi::{PhysicalSize, Size};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    config::ResponsiveConfig,
    query::{MinWidth, QueryError},
    unit::DEFAULT_ROOT_FONT_SIZE,
};

/// Answers whether the current viewport satisfies a width query.
pub trait ViewportPredicate {
    fn matches(&self, query: &MinWidth) -> bool;

    /// Evaluate a query written as an expression such as `(min-width: 48em)`.
    fn matches_expr(&self, expr: &str) -> Result<bool, QueryError> {
        let query: MinWidth = expr.parse()?;
        Ok(self.matches(&query))
    }
}

impl<P: ViewportPredicate + ?Sized> ViewportPredicate for &P {
    fn matches(&self, query: &MinWidth) -> bool {
        (**self).matches(query)
    }
}

/// A fixed viewport width, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportWidth {
    pub width: f64,
    pub root_font_size: f64,
}

impl ViewportWidth {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
        }
    }

    pub fn with_root_font_size(mut self, root_font_size: f64) -> Self {
        self.root_font_size = root_font_size;
        self
    }
}

impl ViewportPredicate for ViewportWidth {
    fn matches(&self, query: &MinWidth) -> bool {
        query.matches(self.width, self.root_font_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    #[error("invalid scale factor {0}")]
    InvalidScaleFactor(f64),
    #[error("root font size must be finite and positive, got {0}")]
    InvalidRootFontSize(f64),
}

new_key_type! {
    /// Identifies one watch registered on a [`Viewport`].
    pub struct WatchId;
}

type WatchCallback = Rc<RefCell<dyn FnMut(bool)>>;

struct Watch {
    query: MinWidth,
    matched: bool,
    callback: WatchCallback,
}

struct ViewportState {
    width: f64,
    root_font_size: f64,
    scale_factor: f64,
    watches: SlotMap<WatchId, Watch>,
    notifying: bool,
    pending: bool,
}

impl ViewportState {
    fn matches(&self, query: &MinWidth) -> bool {
        query.matches(self.width, self.root_font_size)
    }
}

/// An observable viewport.
///
/// Cloning a `Viewport` yields another handle to the same viewport. Everything
/// runs on the thread that owns it: a resize re-evaluates the registered watches
/// synchronously and calls back the ones whose query flipped.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
/// use responsive_value::{MinWidth, Viewport};
///
/// let viewport = Viewport::new(600.0);
/// let wide = Rc::new(Cell::new(false));
/// let _watch = viewport.watch("(min-width: 48em)".parse::<MinWidth>().unwrap(), {
///     let wide = wide.clone();
///     move |matched| wide.set(matched)
/// });
///
/// viewport.resize(1024.0);
/// assert!(wide.get());
/// ```
#[derive(Clone)]
pub struct Viewport {
    state: Rc<RefCell<ViewportState>>,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Viewport")
            .field("width", &state.width)
            .field("root_font_size", &state.root_font_size)
            .field("scale_factor", &state.scale_factor)
            .field("watches", &state.watches.len())
            .finish()
    }
}

impl Viewport {
    /// A viewport `width` logical pixels wide.
    pub fn new(width: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                width: sanitize_width(width),
                root_font_size: DEFAULT_ROOT_FONT_SIZE,
                scale_factor: 1.0,
                watches: SlotMap::with_key(),
                notifying: false,
                pending: false,
            })),
        }
    }

    /// A viewport using the configured root font size.
    pub fn with_config(width: f64, config: &ResponsiveConfig) -> Result<Self, ViewportError> {
        let viewport = Self::new(width);
        viewport.set_root_font_size(config.root_font_size)?;
        Ok(viewport)
    }

    /// Logical width.
    pub fn width(&self) -> f64 {
        self.state.borrow().width
    }

    pub fn root_font_size(&self) -> f64 {
        self.state.borrow().root_font_size
    }

    pub fn scale_factor(&self) -> f64 {
        self.state.borrow().scale_factor
    }

    /// The current width as a fixed snapshot.
    pub fn snapshot(&self) -> ViewportWidth {
        let state = self.state.borrow();
        ViewportWidth {
            width: state.width,
            root_font_size: state.root_font_size,
        }
    }

    pub(crate) fn downgrade(&self) -> WeakViewport {
        WeakViewport {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Number of live watches.
    pub fn watch_count(&self) -> usize {
        self.state.borrow().watches.len()
    }

    /// Set the logical width and notify watches whose query flipped.
    pub fn resize(&self, width: f64) {
        let width = sanitize_width(width);
        {
            let mut state = self.state.borrow_mut();
            if state.width == width {
                return;
            }
            trace!(from = state.width, to = width, "viewport resized");
            state.width = width;
        }
        self.notify();
    }

    /// Resize from a logical or physical size. Physical sizes are divided by
    /// the current scale factor.
    pub fn resize_to(&self, size: impl Into<Size>) {
        let logical = size.into().to_logical::<f64>(self.scale_factor());
        self.resize(logical.width);
    }

    pub fn resize_physical(&self, size: PhysicalSize<u32>) {
        self.resize_to(size);
    }

    /// Change the scale factor used to convert physical sizes. The logical
    /// width is unchanged; the platform reports the new physical size with a
    /// following resize.
    pub fn set_scale_factor(&self, scale_factor: f64) -> Result<(), ViewportError> {
        if !dpi::validate_scale_factor(scale_factor) {
            return Err(ViewportError::InvalidScaleFactor(scale_factor));
        }
        self.state.borrow_mut().scale_factor = scale_factor;
        Ok(())
    }

    /// Change the font size `em` thresholds resolve against. Watches on `em`
    /// or `rem` thresholds may flip.
    pub fn set_root_font_size(&self, root_font_size: f64) -> Result<(), ViewportError> {
        if !root_font_size.is_finite() || root_font_size <= 0.0 {
            return Err(ViewportError::InvalidRootFontSize(root_font_size));
        }
        {
            let mut state = self.state.borrow_mut();
            if state.root_font_size == root_font_size {
                return Ok(());
            }
            state.root_font_size = root_font_size;
        }
        self.notify();
        Ok(())
    }

    /// Call `f` with the new result every time `query` starts or stops
    /// matching. `f` is not called for the current state; use
    /// [`ViewportPredicate::matches`] for that.
    ///
    /// The watch lives as long as the returned [`Subscription`].
    pub fn watch(&self, query: MinWidth, f: impl FnMut(bool) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        let matched = state.matches(&query);
        let id = state.watches.insert(Watch {
            query,
            matched,
            callback: Rc::new(RefCell::new(f)),
        });
        debug!(%query, matched, "width query watched");
        Subscription {
            id,
            viewport: Rc::downgrade(&self.state),
        }
    }

    fn notify(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.notifying {
                // A watch callback resized the viewport. Finish the current pass
                // first, then run another one against the latest width.
                state.pending = true;
                return;
            }
            state.notifying = true;
        }

        loop {
            for (id, callback, matched) in self.flipped() {
                if !self.state.borrow().watches.contains_key(id) {
                    continue;
                }
                (&mut *callback.borrow_mut())(matched);
            }

            let mut state = self.state.borrow_mut();
            if !state.pending {
                state.notifying = false;
                break;
            }
            state.pending = false;
        }
    }

    fn flipped(&self) -> SmallVec<[(WatchId, WatchCallback, bool); 8]> {
        let mut state = self.state.borrow_mut();
        let ViewportState {
            width,
            root_font_size,
            watches,
            ..
        } = &mut *state;

        // Watches often share a threshold; resolve each one once per pass.
        let mut resolved: FxHashMap<u64, bool> = FxHashMap::default();
        let mut flipped = SmallVec::new();
        for (id, watch) in watches.iter_mut() {
            let threshold = watch.query.to_px(*root_font_size);
            let matched = *resolved
                .entry(threshold.to_bits())
                .or_insert(*width >= threshold);
            if matched != watch.matched {
                watch.matched = matched;
                debug!(query = %watch.query, matched, "width query changed");
                flipped.push((id, watch.callback.clone(), matched));
            }
        }
        flipped
    }
}

impl ViewportPredicate for Viewport {
    fn matches(&self, query: &MinWidth) -> bool {
        self.state.borrow().matches(query)
    }
}

/// A handle that does not keep the viewport alive, for watch callbacks that
/// need to read it back.
#[derive(Clone)]
pub(crate) struct WeakViewport {
    state: Weak<RefCell<ViewportState>>,
}

impl WeakViewport {
    pub(crate) fn upgrade(&self) -> Option<Viewport> {
        self.state.upgrade().map(|state| Viewport { state })
    }
}

fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() && width >= 0.0 {
        width
    } else {
        warn!(width, "invalid viewport width, clamping to 0");
        0.0
    }
}

/// Keeps a [`Viewport::watch`] registered. Dropping it removes the watch.
#[must_use = "the watch is removed when the subscription is dropped"]
pub struct Subscription {
    id: WatchId,
    viewport: Weak<RefCell<ViewportState>>,
}

impl Subscription {
    pub fn id(&self) -> WatchId {
        self.id
    }

    /// Whether the viewport this watch was registered on is still alive.
    pub fn is_active(&self) -> bool {
        self.viewport
            .upgrade()
            .is_some_and(|state| state.borrow().watches.contains_key(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.viewport.upgrade() {
            state.borrow_mut().watches.remove(self.id);
        }
    }
}
