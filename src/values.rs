use crate::breakpoint::{Breakpoint, BreakpointFlags};

/// Candidate values keyed by breakpoint label.
///
/// Any subset of labels may be present. A label that is absent is skipped when
/// selecting, while a present entry is a candidate whatever its value is, so
/// `Some(0)` or `Some("")` are as valid as any other value.
///
/// ```rust
/// use responsive_value::{Breakpoint, ResponsiveValues};
///
/// let columns = ResponsiveValues::new().sm(2).lg(4);
/// assert_eq!(columns.get(Breakpoint::Sm), Some(&2));
/// assert_eq!(columns.get(Breakpoint::Md), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponsiveValues<T> {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub xs: Option<T>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub sm: Option<T>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub md: Option<T>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub lg: Option<T>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub xl: Option<T>,
}

impl<T> Default for ResponsiveValues<T> {
    fn default() -> Self {
        Self {
            xs: None,
            sm: None,
            md: None,
            lg: None,
            xl: None,
        }
    }
}

impl<T> ResponsiveValues<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xs(mut self, value: T) -> Self {
        self.xs = Some(value);
        self
    }

    pub fn sm(mut self, value: T) -> Self {
        self.sm = Some(value);
        self
    }

    pub fn md(mut self, value: T) -> Self {
        self.md = Some(value);
        self
    }

    pub fn lg(mut self, value: T) -> Self {
        self.lg = Some(value);
        self
    }

    pub fn xl(mut self, value: T) -> Self {
        self.xl = Some(value);
        self
    }

    fn slot(&self, bp: Breakpoint) -> &Option<T> {
        match bp {
            Breakpoint::Xs => &self.xs,
            Breakpoint::Sm => &self.sm,
            Breakpoint::Md => &self.md,
            Breakpoint::Lg => &self.lg,
            Breakpoint::Xl => &self.xl,
        }
    }

    fn slot_mut(&mut self, bp: Breakpoint) -> &mut Option<T> {
        match bp {
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Xl => &mut self.xl,
        }
    }

    pub fn get(&self, bp: Breakpoint) -> Option<&T> {
        self.slot(bp).as_ref()
    }

    /// Set the value for `bp`, returning the value it replaced.
    pub fn insert(&mut self, bp: Breakpoint, value: T) -> Option<T> {
        self.slot_mut(bp).replace(value)
    }

    pub fn remove(&mut self, bp: Breakpoint) -> Option<T> {
        self.slot_mut(bp).take()
    }

    pub fn contains(&self, bp: Breakpoint) -> bool {
        self.slot(bp).is_some()
    }

    /// The labels that carry a value.
    pub fn present(&self) -> BreakpointFlags {
        let mut flags = BreakpointFlags::empty();
        for bp in Breakpoint::ALL {
            if self.contains(bp) {
                flags |= bp.flag();
            }
        }
        flags
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }

    /// Present entries, narrowest label first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &T)> {
        Breakpoint::ALL
            .into_iter()
            .filter_map(move |bp| self.get(bp).map(|value| (bp, value)))
    }

    pub fn as_ref(&self) -> ResponsiveValues<&T> {
        ResponsiveValues {
            xs: self.xs.as_ref(),
            sm: self.sm.as_ref(),
            md: self.md.as_ref(),
            lg: self.lg.as_ref(),
            xl: self.xl.as_ref(),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ResponsiveValues<U> {
        ResponsiveValues {
            xs: self.xs.map(&mut f),
            sm: self.sm.map(&mut f),
            md: self.md.map(&mut f),
            lg: self.lg.map(&mut f),
            xl: self.xl.map(&mut f),
        }
    }
}

impl<T> FromIterator<(Breakpoint, T)> for ResponsiveValues<T> {
    fn from_iter<I: IntoIterator<Item = (Breakpoint, T)>>(iter: I) -> Self {
        let mut values = Self::default();
        values.extend(iter);
        values
    }
}

impl<T> Extend<(Breakpoint, T)> for ResponsiveValues<T> {
    fn extend<I: IntoIterator<Item = (Breakpoint, T)>>(&mut self, iter: I) {
        for (bp, value) in iter {
            self.insert(bp, value);
        }
    }
}
