use std::{cell::RefCell, fmt, rc::Rc};

use smallvec::SmallVec;
use tracing::trace;

use crate::{
    breakpoint::{Breakpoint, BreakpointFlags, Breakpoints},
    config::ResponsiveConfig,
    select::resolve,
    values::ResponsiveValues,
    viewport::{Subscription, Viewport, ViewportPredicate},
};

type Listener<T> = Box<dyn FnMut(&T)>;

#[derive(educe::Educe)]
#[educe(Debug)]
struct State<T> {
    default: T,
    values: ResponsiveValues<T>,
    breakpoints: Breakpoints,
    /// Watched labels whose threshold the viewport currently reaches.
    satisfied: BreakpointFlags,
    selected: Option<Breakpoint>,
    current: T,
    #[educe(Debug(ignore))]
    listeners: SmallVec<[Listener<T>; 1]>,
    notifying: bool,
    pending: bool,
}

impl<T: Clone + PartialEq + 'static> State<T> {
    /// Re-run selection. Returns whether the selected value changed.
    fn recompute(&mut self) -> bool {
        let satisfied = self.satisfied;
        let (selected, value) = match resolve(&self.values, |bp| satisfied.contains(bp.flag())) {
            Some((bp, value)) => (Some(bp), value.clone()),
            None => (None, self.default.clone()),
        };
        trace!(?selected, ?satisfied, "responsive value recomputed");

        self.selected = selected;
        if value == self.current {
            return false;
        }
        self.current = value;
        true
    }

    /// Which present labels' thresholds `viewport` reaches right now.
    fn read_satisfied(&self, viewport: &Viewport) -> BreakpointFlags {
        let mut satisfied = BreakpointFlags::empty();
        for bp in self.values.present().breakpoints() {
            satisfied.set(bp.flag(), viewport.matches(&self.breakpoints.query(bp)));
        }
        satisfied
    }

    /// Bring the selection in line with the viewport's current width.
    ///
    /// Every flip in one resize lands here, but reading the width rather than the
    /// single flipped query means only the first call can change the selection.
    fn sync(state: &Rc<RefCell<Self>>, viewport: &Viewport) {
        let changed = {
            let mut state = state.borrow_mut();
            state.satisfied = state.read_satisfied(viewport);
            state.recompute()
        };
        if changed {
            Self::notify(state);
        }
    }

    fn notify(state: &Rc<RefCell<Self>>) {
        {
            let mut state = state.borrow_mut();
            if state.notifying {
                // A listener changed the selection again. The running pass
                // delivers the newer value once its listeners return.
                state.pending = true;
                return;
            }
            state.notifying = true;
        }

        let mut delivered: Option<T> = None;
        loop {
            let (mut listeners, value) = {
                let mut state = state.borrow_mut();
                state.pending = false;
                (std::mem::take(&mut state.listeners), state.current.clone())
            };

            if delivered.as_ref() != Some(&value) {
                for listener in listeners.iter_mut() {
                    listener(&value);
                }
            }

            // Listeners registered while notifying were pushed onto the emptied list.
            let mut state = state.borrow_mut();
            let added = std::mem::replace(&mut state.listeners, listeners);
            state.listeners.extend(added);
            if !state.pending {
                state.notifying = false;
                break;
            }
            delivered = Some(value);
        }
    }
}

/// A value that follows the viewport across breakpoints.
///
/// `Responsive` holds a default, a [`ResponsiveValues`] set and the breakpoint
/// thresholds, and keeps the selected value current as the [`Viewport`]
/// resizes. It only watches the thresholds of labels that carry a value, and
/// it only calls its [`on_change`](Self::on_change) listeners when the selected
/// value actually changes.
///
/// ```rust
/// use responsive_value::{Responsive, ResponsiveValues, Viewport};
///
/// let viewport = Viewport::new(400.0);
/// let columns = Responsive::new(&viewport, 1, ResponsiveValues::new().sm(2).lg(4), None);
/// assert_eq!(columns.get(), 1);
///
/// viewport.resize(800.0);
/// assert_eq!(columns.get(), 2);
///
/// viewport.resize(1300.0);
/// assert_eq!(columns.get(), 4);
/// ```
pub struct Responsive<T> {
    state: Rc<RefCell<State<T>>>,
    viewport: Viewport,
    subscriptions: RefCell<SmallVec<[Subscription; 5]>>,
}

impl<T: fmt::Debug> fmt::Debug for Responsive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responsive")
            .field("state", &*self.state.borrow())
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Responsive<T> {
    /// Track the value for `viewport`. `None` breakpoints means
    /// [`Breakpoints::default`].
    pub fn new(
        viewport: &Viewport,
        default: T,
        values: ResponsiveValues<T>,
        breakpoints: Option<&Breakpoints>,
    ) -> Self {
        let current = default.clone();
        let responsive = Self {
            state: Rc::new(RefCell::new(State {
                default,
                values,
                breakpoints: breakpoints.copied().unwrap_or_default(),
                satisfied: BreakpointFlags::empty(),
                selected: None,
                current,
                listeners: SmallVec::new(),
                notifying: false,
                pending: false,
            })),
            viewport: viewport.clone(),
            subscriptions: RefCell::new(SmallVec::new()),
        };
        responsive.subscribe();
        responsive.state.borrow_mut().recompute();
        responsive
    }

    pub fn from_config(
        viewport: &Viewport,
        config: &ResponsiveConfig,
        default: T,
        values: ResponsiveValues<T>,
    ) -> Self {
        Self::new(viewport, default, values, Some(&config.breakpoints))
    }

    /// Replace the watches with one per present label, and re-read which of
    /// their thresholds the viewport currently reaches.
    fn subscribe(&self) {
        let mut subscriptions = self.subscriptions.borrow_mut();
        subscriptions.clear();

        let mut state = self.state.borrow_mut();
        for bp in state.values.present().breakpoints() {
            let weak_state = Rc::downgrade(&self.state);
            let weak_viewport = self.viewport.downgrade();
            let watch = self.viewport.watch(state.breakpoints.query(bp), move |_| {
                if let Some(state) = weak_state.upgrade()
                    && let Some(viewport) = weak_viewport.upgrade()
                {
                    State::sync(&state, &viewport);
                }
            });
            subscriptions.push(watch);
        }
        state.satisfied = state.read_satisfied(&self.viewport);
    }

    fn refresh(&self) {
        let changed = self.state.borrow_mut().recompute();
        if changed {
            State::notify(&self.state);
        }
    }

    /// The currently selected value.
    pub fn get(&self) -> T {
        self.state.borrow().current.clone()
    }

    pub fn with<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        f(&self.state.borrow().current)
    }

    /// The label the current value came from, or `None` when it is the default.
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.state.borrow().selected
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Call `f` with the new value whenever the selection changes.
    pub fn on_change(&self, f: impl FnMut(&T) + 'static) {
        self.state.borrow_mut().listeners.push(Box::new(f));
    }

    pub fn set_default(&self, default: T) {
        {
            let mut state = self.state.borrow_mut();
            if state.default == default {
                return;
            }
            state.default = default;
        }
        self.refresh();
    }

    /// Replace the candidate values. Watches are re-registered for the labels
    /// that are now present.
    pub fn set_values(&self, values: ResponsiveValues<T>) {
        {
            let mut state = self.state.borrow_mut();
            if state.values == values {
                return;
            }
            state.values = values;
        }
        self.subscribe();
        self.refresh();
    }

    pub fn set_breakpoints(&self, breakpoints: Option<&Breakpoints>) {
        let breakpoints = breakpoints.copied().unwrap_or_default();
        {
            let mut state = self.state.borrow_mut();
            if state.breakpoints == breakpoints {
                return;
            }
            state.breakpoints = breakpoints;
        }
        self.subscribe();
        self.refresh();
    }
}
