use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::unit::{Length, ParseLengthError};

/// A "viewport is at least this wide" predicate, written `(min-width: 48em)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinWidth(pub Length);

impl MinWidth {
    pub fn threshold(&self) -> Length {
        self.0
    }

    /// The threshold in logical pixels.
    pub fn to_px(&self, root_font_size: f64) -> f64 {
        self.0.to_px(root_font_size)
    }

    /// Whether a viewport `width` logical pixels wide satisfies this predicate.
    /// The bound is inclusive.
    pub fn matches(&self, width: f64, root_font_size: f64) -> bool {
        width >= self.to_px(root_font_size)
    }
}

impl From<Length> for MinWidth {
    fn from(length: Length) -> Self {
        MinWidth(length)
    }
}

impl fmt::Display for MinWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(min-width: {})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("expected `(min-width: <length>)`, found `{0}`")]
    Malformed(String),
    #[error(transparent)]
    Length(#[from] ParseLengthError),
}

impl FromStr for MinWidth {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = match trimmed.strip_prefix('(') {
            Some(rest) => rest
                .strip_suffix(')')
                .ok_or_else(|| QueryError::Malformed(s.to_string()))?,
            None => trimmed,
        };

        let (feature, value) = inner
            .split_once(':')
            .ok_or_else(|| QueryError::Malformed(s.to_string()))?;
        if !feature.trim().eq_ignore_ascii_case("min-width") {
            return Err(QueryError::Malformed(s.to_string()));
        }

        Ok(MinWidth(value.parse()?))
    }
}
