//! Encoding configuration.
//!
//! This module provides the [`Config`] struct and [`ConfigBuilder`]. A config
//! is constructed explicitly and handed to the codecs and streams that need
//! it; there is no process-wide default instance.

/// Configuration shared by the element codecs and the output stream.
///
/// # Example
///
/// ```rust
/// use seqjson::Config;
///
/// let config = Config::builder()
///     .escape_html(false)
///     .indent_step(2)
///     .build();
/// assert_eq!(config.indent_step(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Escape `<`, `>`, `&`, U+2028 and U+2029 inside strings.
    pub(crate) escape_html: bool,
    /// Spaces per nesting level. `0` writes compact output.
    pub(crate) indent_step: usize,
    /// Write floats with at most six fractional digits.
    pub(crate) lossy_floats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            escape_html: true,
            indent_step: 0,
            lossy_floats: false,
        }
    }
}

impl Config {
    /// Creates a new [`ConfigBuilder`] starting from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Compact output, no HTML escaping, six-digit floats.
    pub fn fastest() -> Self {
        Self {
            escape_html: false,
            indent_step: 0,
            lossy_floats: true,
        }
    }

    /// Returns whether HTML-sensitive characters are escaped in strings.
    pub fn escape_html(&self) -> bool {
        self.escape_html
    }

    /// Returns the indentation step.
    pub fn indent_step(&self) -> usize {
        self.indent_step
    }

    /// Returns whether floats are written with six fractional digits.
    pub fn lossy_floats(&self) -> bool {
        self.lossy_floats
    }
}

/// Builder for constructing a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets HTML-safe string escaping.
    pub fn escape_html(mut self, escape: bool) -> Self {
        self.config.escape_html = escape;
        self
    }

    /// Sets the number of spaces per nesting level.
    pub fn indent_step(mut self, step: usize) -> Self {
        self.config.indent_step = step;
        self
    }

    /// Sets six-digit float output.
    pub fn lossy_floats(mut self, lossy: bool) -> Self {
        self.config.lossy_floats = lossy;
        self
    }

    /// Builds the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}
