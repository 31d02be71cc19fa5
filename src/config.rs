//! Breakpoint configuration.
//!
//! There is no process-wide configuration. A [`ResponsiveConfig`] is built or
//! loaded by the application and handed to [`Viewport::with_config`] and
//! [`Responsive::from_config`] wherever it applies.
//!
//! [`Viewport::with_config`]: crate::Viewport::with_config
//! [`Responsive::from_config`]: crate::Responsive::from_config

use crate::{breakpoint::Breakpoints, unit::DEFAULT_ROOT_FONT_SIZE};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ResponsiveConfig {
    pub breakpoints: Breakpoints,
    /// Font size in logical pixels that `em` and `rem` thresholds resolve against.
    pub root_font_size: f64,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
        }
    }
}

impl ResponsiveConfig {
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            ..Self::default()
        }
    }

    /// Set the root font size. It is checked when the configuration is handed
    /// to [`Viewport::with_config`](crate::Viewport::with_config).
    pub fn root_font_size(mut self, root_font_size: f64) -> Self {
        self.root_font_size = root_font_size;
        self
    }
}

#[cfg(feature = "serde")]
pub use load::ConfigError;

#[cfg(feature = "serde")]
mod load {
    use std::{fs::File, io::Read, path::Path};

    use thiserror::Error;
    use tracing::debug;

    use super::ResponsiveConfig;
    use crate::breakpoint::BreakpointsError;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to read breakpoint configuration")]
        Io(#[from] std::io::Error),
        #[error("invalid breakpoint configuration")]
        Json(#[from] serde_json::Error),
        #[error("root font size must be finite and positive, got {0}")]
        InvalidRootFontSize(f64),
        #[error("breakpoints are out of order at a {root_font_size}px root font size")]
        Breakpoints {
            root_font_size: f64,
            #[source]
            source: BreakpointsError,
        },
    }

    impl ResponsiveConfig {
        /// Parse a configuration such as
        /// `{ "breakpoints": { "sm": "40em" }, "root_font_size": 16 }`.
        ///
        /// Every field is optional; breakpoint labels that are left out keep
        /// their default thresholds.
        pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
            let config: Self = serde_json::from_str(json)?;
            config.validate()
        }

        pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
            let config: Self = serde_json::from_reader(reader)?;
            config.validate()
        }

        pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
            let path = path.as_ref();
            let config = Self::from_reader(std::io::BufReader::new(File::open(path)?))?;
            debug!(
                path = %path.display(),
                breakpoints = ?config.breakpoints,
                "loaded breakpoint configuration"
            );
            Ok(config)
        }

        fn validate(self) -> Result<Self, ConfigError> {
            if !self.root_font_size.is_finite() || self.root_font_size <= 0.0 {
                return Err(ConfigError::InvalidRootFontSize(self.root_font_size));
            }
            self.breakpoints
                .validate_at(self.root_font_size)
                .map_err(|source| ConfigError::Breakpoints {
                    root_font_size: self.root_font_size,
                    source,
                })?;
            Ok(self)
        }
    }
}
