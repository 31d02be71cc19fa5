use std::fmt;

use bitflags::bitflags;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::{
    query::MinWidth,
    unit::{DEFAULT_ROOT_FONT_SIZE, Length},
};

bitflags! {
    /// A set of breakpoint labels, one bit per label.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[must_use]
    pub struct BreakpointFlags: u8 {
        const XS = 1;
        const SM = 2;
        const MD = 4;
        const LG = 8;
        const XL = 16;
    }
}

/// The five fixed breakpoint labels, ordered from the narrowest threshold to
/// the widest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// Every label, narrowest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    /// Every label, widest first. This is the order selection walks.
    pub fn descending() -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().rev()
    }

    pub const fn flag(self) -> BreakpointFlags {
        match self {
            Breakpoint::Xs => BreakpointFlags::XS,
            Breakpoint::Sm => BreakpointFlags::SM,
            Breakpoint::Md => BreakpointFlags::MD,
            Breakpoint::Lg => BreakpointFlags::LG,
            Breakpoint::Xl => BreakpointFlags::XL,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl BreakpointFlags {
    /// The labels in this set, narrowest first.
    pub fn breakpoints(self) -> impl Iterator<Item = Breakpoint> {
        Breakpoint::ALL
            .into_iter()
            .filter(move |bp| self.contains(bp.flag()))
    }

    /// The widest label in this set.
    pub fn widest(self) -> Option<Breakpoint> {
        Breakpoint::descending().find(|bp| self.contains(bp.flag()))
    }
}

impl From<Breakpoint> for BreakpointFlags {
    fn from(bp: Breakpoint) -> Self {
        bp.flag()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakpointsError {
    #[error("breakpoint `{upper}` ({upper_len}) must be wider than `{lower}` ({lower_len})")]
    NotIncreasing {
        lower: Breakpoint,
        lower_len: String,
        upper: Breakpoint,
        upper_len: String,
    },
}

/// Width thresholds for the five breakpoint labels.
///
/// Each threshold is a "viewport is at least this wide" bound. The thresholds
/// always increase with the label order; the constructors reject any set that
/// does not, comparing at [`DEFAULT_ROOT_FONT_SIZE`].
#[derive(Clone, Copy, PartialEq)]
pub struct Breakpoints {
    thresholds: [Length; 5],
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            thresholds: [
                Length::Em(36.0),
                Length::Em(48.0),
                Length::Em(62.0),
                Length::Em(75.0),
                Length::Em(88.0),
            ],
        }
    }
}

impl fmt::Debug for Breakpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Breakpoints");
        for bp in Breakpoint::ALL {
            let name: &'static str = bp.into();
            s.field(name, &format_args!("{}", self.get(bp)));
        }
        s.finish()
    }
}

impl Breakpoints {
    pub fn new(
        xs: impl Into<Length>,
        sm: impl Into<Length>,
        md: impl Into<Length>,
        lg: impl Into<Length>,
        xl: impl Into<Length>,
    ) -> Result<Self, BreakpointsError> {
        Self::from_array([xs.into(), sm.into(), md.into(), lg.into(), xl.into()])
    }

    pub(crate) fn from_array(thresholds: [Length; 5]) -> Result<Self, BreakpointsError> {
        let breakpoints = Self { thresholds };
        breakpoints.validate()?;
        Ok(breakpoints)
    }

    /// Replace one threshold, keeping the others.
    pub fn with(
        mut self,
        bp: Breakpoint,
        length: impl Into<Length>,
    ) -> Result<Self, BreakpointsError> {
        self.thresholds[bp.index()] = length.into();
        self.validate()?;
        Ok(self)
    }

    pub fn get(&self, bp: Breakpoint) -> Length {
        self.thresholds[bp.index()]
    }

    /// The width predicate that decides whether `bp` applies.
    pub fn query(&self, bp: Breakpoint) -> MinWidth {
        MinWidth(self.get(bp))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, Length)> + '_ {
        Breakpoint::ALL.into_iter().map(|bp| (bp, self.get(bp)))
    }

    /// Every label whose threshold `width` reaches.
    pub fn satisfied(&self, width: f64, root_font_size: f64) -> BreakpointFlags {
        let mut flags = BreakpointFlags::empty();
        for bp in Breakpoint::ALL {
            if self.query(bp).matches(width, root_font_size) {
                flags |= bp.flag();
            }
        }
        flags
    }

    /// The widest label whose threshold `width` reaches, or `None` when the
    /// viewport is narrower than `xs`.
    pub fn current(&self, width: f64, root_font_size: f64) -> Option<Breakpoint> {
        Breakpoint::descending().find(|bp| self.query(*bp).matches(width, root_font_size))
    }

    fn validate(&self) -> Result<(), BreakpointsError> {
        self.validate_at(DEFAULT_ROOT_FONT_SIZE)
    }

    /// Check that the thresholds still increase once `em` and `rem` resolve
    /// against `root_font_size`. Sets that mix `px` with relative units can be
    /// ordered at one font size and out of order at another.
    pub fn validate_at(&self, root_font_size: f64) -> Result<(), BreakpointsError> {
        for pair in Breakpoint::ALL.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            let lower_len = self.get(lower);
            let upper_len = self.get(upper);
            if upper_len.to_px(root_font_size) <= lower_len.to_px(root_font_size) {
                return Err(BreakpointsError::NotIncreasing {
                    lower,
                    lower_len: lower_len.to_string(),
                    upper,
                    upper_len: upper_len.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};

    use super::{Breakpoint, Breakpoints};
    use crate::unit::Length;

    /// Labels left out fall back to the default thresholds.
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct PartialBreakpoints {
        xs: Option<Length>,
        sm: Option<Length>,
        md: Option<Length>,
        lg: Option<Length>,
        xl: Option<Length>,
    }

    impl Serialize for Breakpoints {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(Breakpoint::ALL.len()))?;
            for (bp, length) in self.iter() {
                map.serialize_entry(&bp, &length)?;
            }
            map.end()
        }
    }

    impl<'de> Deserialize<'de> for Breakpoints {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let partial = PartialBreakpoints::deserialize(deserializer)?;
            let defaults = Breakpoints::default().thresholds;
            let overrides = [partial.xs, partial.sm, partial.md, partial.lg, partial.xl];

            let mut thresholds = defaults;
            for (slot, value) in thresholds.iter_mut().zip(overrides) {
                if let Some(value) = value {
                    *slot = value;
                }
            }
            Breakpoints::from_array(thresholds).map_err(serde::de::Error::custom)
        }
    }
}
