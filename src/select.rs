//! Picking the value for the current viewport.
//!
//! Breakpoint thresholds are "at least this wide" predicates, so a wide viewport
//! satisfies every narrower threshold as well. Selection therefore walks the
//! labels from `xl` down to `xs` and takes the first label that both has a value
//! and whose threshold the viewport reaches, falling back to the default when
//! none does.

use crate::{
    breakpoint::{Breakpoint, Breakpoints},
    values::ResponsiveValues,
    viewport::ViewportPredicate,
};

/// The widest present label for which `matches` holds, with its value.
///
/// `matches` is only consulted for labels that carry a value.
pub fn resolve<T>(
    values: &ResponsiveValues<T>,
    mut matches: impl FnMut(Breakpoint) -> bool,
) -> Option<(Breakpoint, &T)> {
    Breakpoint::descending().find_map(|bp| match values.get(bp) {
        Some(value) if matches(bp) => Some((bp, value)),
        _ => None,
    })
}

/// Borrowing form of [`select`].
pub fn select_ref<'a, T>(
    default: &'a T,
    values: &'a ResponsiveValues<T>,
    breakpoints: Option<&Breakpoints>,
    viewport: &impl ViewportPredicate,
) -> &'a T {
    let fallback;
    let breakpoints = match breakpoints {
        Some(breakpoints) => breakpoints,
        None => {
            fallback = Breakpoints::default();
            &fallback
        }
    };

    resolve(values, |bp| viewport.matches(&breakpoints.query(bp)))
        .map(|(_, value)| value)
        .unwrap_or(default)
}

/// Select the value for the viewport's current width.
///
/// Walks `xl`, `lg`, `md`, `sm`, `xs` in that order and returns the value of the
/// first label that is present in `values` and whose threshold the viewport
/// reaches. Returns `default` when no label qualifies. Without explicit
/// `breakpoints`, [`Breakpoints::default`] applies.
///
/// ```rust
/// use responsive_value::{ResponsiveValues, ViewportWidth, select};
///
/// let values = ResponsiveValues::new().sm("tablet").lg("desktop");
///
/// assert_eq!(select("base", &values, None, &ViewportWidth::new(800.0)), "tablet");
/// assert_eq!(select("base", &values, None, &ViewportWidth::new(1300.0)), "desktop");
/// assert_eq!(select("base", &values, None, &ViewportWidth::new(400.0)), "base");
/// ```
pub fn select<T: Clone>(
    default: T,
    values: &ResponsiveValues<T>,
    breakpoints: Option<&Breakpoints>,
    viewport: &impl ViewportPredicate,
) -> T {
    let breakpoints = breakpoints.copied().unwrap_or_default();
    match resolve(values, |bp| viewport.matches(&breakpoints.query(bp))) {
        Some((_, value)) => value.clone(),
        None => default,
    }
}

/// JavaScript-style truthiness, for [`select_truthy`].
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_int {
    ($($ty:ty),*) => {
        $(
            impl Truthy for $ty {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// Like [`select`], but an entry whose value is falsy (`0`, `0.0`, `""`,
/// `false`) is treated as if it were absent.
///
/// This reproduces callers that guard each label with a truthiness check. It
/// exists for compatibility only: `select` is the one to use, since it never
/// discards a legitimate value.
pub fn select_truthy<T: Clone + Truthy>(
    default: T,
    values: &ResponsiveValues<T>,
    breakpoints: Option<&Breakpoints>,
    viewport: &impl ViewportPredicate,
) -> T {
    let breakpoints = breakpoints.copied().unwrap_or_default();
    let truthy = values.as_ref();
    let found = resolve(&truthy, |bp| {
        truthy.get(bp).is_some_and(|value| value.is_truthy())
            && viewport.matches(&breakpoints.query(bp))
    });
    match found {
        Some((_, value)) => (*value).clone(),
        None => default,
    }
}
