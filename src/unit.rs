//! Lengths used by breakpoint thresholds.
//!
//! Thresholds are written the way stylesheets write them (`"36em"`, `"768px"`),
//! and resolved to logical pixels only when a viewport width is compared
//! against them.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Font size, in logical pixels, that `em` and `rem` resolve against when no
/// other root font size is configured.
pub const DEFAULT_ROOT_FONT_SIZE: f64 = 16.0;

/// A non-negative length in one of the units a width threshold may use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Em(f64),
    Rem(f64),
}

impl Length {
    pub fn px(value: f64) -> Self {
        Length::Px(value)
    }

    pub fn em(value: f64) -> Self {
        Length::Em(value)
    }

    pub fn rem(value: f64) -> Self {
        Length::Rem(value)
    }

    /// The magnitude without its unit.
    pub fn value(&self) -> f64 {
        match *self {
            Length::Px(v) | Length::Em(v) | Length::Rem(v) => v,
        }
    }

    /// Resolve to logical pixels.
    ///
    /// Inside a width query `em` is relative to the initial font size rather than
    /// any element's, so `em` and `rem` resolve identically.
    pub fn to_px(&self, root_font_size: f64) -> f64 {
        match *self {
            Length::Px(v) => v,
            Length::Em(v) | Length::Rem(v) => v * root_font_size,
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            Length::Px(_) => "px",
            Length::Em(_) => "em",
            Length::Rem(_) => "rem",
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Length::Px(value)
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Length::Px(value as f64)
    }
}

impl From<i32> for Length {
    fn from(value: i32) -> Self {
        Length::Px(value as f64)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value(), self.unit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLengthError {
    #[error("length is empty")]
    Empty,
    #[error("invalid number in length `{0}`")]
    InvalidNumber(String),
    #[error("unknown unit `{unit}` in length `{input}`")]
    UnknownUnit { input: String, unit: String },
    #[error("length `{0}` must be finite and non-negative")]
    OutOfRange(String),
}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(ParseLengthError::Empty);
        }

        // The unit is the trailing run of letters, so `1e3px` keeps its exponent.
        let split = input
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .len();
        let (number, unit) = input.split_at(split);

        let value: f64 = number
            .trim_end()
            .parse()
            .map_err(|_| ParseLengthError::InvalidNumber(input.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ParseLengthError::OutOfRange(input.to_string()));
        }

        match unit.to_ascii_lowercase().as_str() {
            "" | "px" => Ok(Length::Px(value)),
            "em" => Ok(Length::Em(value)),
            "rem" => Ok(Length::Rem(value)),
            _ => Err(ParseLengthError::UnknownUnit {
                input: input.to_string(),
                unit: unit.to_string(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Length {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Length {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
