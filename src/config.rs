//! Per-format configuration.
//!
//! Each format takes one immutable config value object, constructed once and
//! passed by reference into every reader/writer call:
//!
//! - [`JsonConfig`]: strictness, pretty-printing, indent string, container
//!   simplification thresholds
//! - [`TomlConfig`]: strictness, indent string, date-time output style
//! - [`YamlConfig`]: strictness, indent width, anchor handling, duplicate-key
//!   tolerance, flow-collapse threshold
//!
//! ## Examples
//!
//! ```rust
//! use polyform::{json, JsonConfig};
//!
//! // Lenient parsing tolerates trailing commas and case-variant literals
//! let config = JsonConfig::new().with_strict(false);
//! let value = json::from_str_with("[1, 2, 3,]", &config).unwrap();
//! assert_eq!(value.as_array().map(Vec::len), Some(3));
//! ```

/// Output style for TOML date-time scalars.
///
/// RFC 3339 permits either `T` or a space between the date and time parts;
/// both round-trip through the reader.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DateTimeStyle {
    /// `1979-05-27T07:32:00Z`
    #[default]
    Rfc3339,
    /// `1979-05-27 07:32:00Z`
    Spaced,
}

/// How the YAML reader handles anchors and aliases.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AnchorMode {
    /// Substitute each alias with the anchored node's already-parsed value.
    /// The anchor wrapper itself disappears; anchor and alias positions end
    /// up holding equal, independent elements.
    #[default]
    Resolve,
    /// Keep distinct `Anchor`/`Alias` wrapper elements for round-trip
    /// fidelity.
    Preserve,
}

/// Configuration for JSON reading and writing.
///
/// # Examples
///
/// ```rust
/// use polyform::JsonConfig;
///
/// // Strict, pretty-printed, two-space indent
/// let config = JsonConfig::new();
///
/// // Compact single-line output
/// let config = JsonConfig::compact();
///
/// // Custom
/// let config = JsonConfig::new()
///     .with_indent("\t")
///     .with_simplify_arrays(5);
/// ```
#[derive(Clone, Debug)]
pub struct JsonConfig {
    /// Reject malformed input (trailing commas, case-variant literals, bare
    /// keys, duplicate keys, trailing content). Lenient mode tolerates all of
    /// these.
    pub strict: bool,
    /// Emit newlines and indentation. When `false`, output is a single line
    /// with no spaces.
    pub pretty: bool,
    /// Indent string repeated once per nesting depth.
    pub indent: String,
    /// Arrays with at most this many elements, none of them non-empty
    /// containers, render on one line even when pretty-printing.
    pub simplify_arrays: usize,
    /// Same for objects.
    pub simplify_objects: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        JsonConfig {
            strict: true,
            pretty: true,
            indent: "  ".to_string(),
            simplify_arrays: 3,
            simplify_objects: 1,
        }
    }
}

impl JsonConfig {
    /// Creates the default configuration (strict, pretty, 2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for compact single-line output.
    #[must_use]
    pub fn compact() -> Self {
        JsonConfig {
            pretty: false,
            ..Default::default()
        }
    }

    /// Sets strict mode for reading.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enables or disables pretty-printing.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the indent string repeated per nesting depth.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the array simplification threshold.
    #[must_use]
    pub fn with_simplify_arrays(mut self, threshold: usize) -> Self {
        self.simplify_arrays = threshold;
        self
    }

    /// Sets the object simplification threshold.
    #[must_use]
    pub fn with_simplify_objects(mut self, threshold: usize) -> Self {
        self.simplify_objects = threshold;
        self
    }
}

/// Configuration for TOML reading and writing.
///
/// # Examples
///
/// ```rust
/// use polyform::{TomlConfig, DateTimeStyle};
///
/// let config = TomlConfig::new().with_datetime_style(DateTimeStyle::Spaced);
/// ```
#[derive(Clone, Debug)]
pub struct TomlConfig {
    /// When `false`, redefining a key replaces the earlier value instead of
    /// failing.
    pub strict: bool,
    /// Indent string for wrapped multi-line arrays.
    pub indent: String,
    /// Separator style for date-time scalars on output.
    pub datetime_style: DateTimeStyle,
}

impl Default for TomlConfig {
    fn default() -> Self {
        TomlConfig {
            strict: true,
            indent: "    ".to_string(),
            datetime_style: DateTimeStyle::Rfc3339,
        }
    }
}

impl TomlConfig {
    /// Creates the default configuration (strict, 4-space indent, RFC 3339
    /// date-times).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict mode for reading.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the indent string for wrapped arrays.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the date-time output style.
    #[must_use]
    pub fn with_datetime_style(mut self, style: DateTimeStyle) -> Self {
        self.datetime_style = style;
        self
    }
}

/// Configuration for YAML reading and writing.
///
/// # Examples
///
/// ```rust
/// use polyform::{yaml, AnchorMode, YamlConfig};
///
/// let config = YamlConfig::new().with_anchors(AnchorMode::Preserve);
/// let doc = yaml::from_str_with("anchor: &v test\nalias: *v", &config).unwrap();
/// assert!(doc.as_mapping().unwrap().get("anchor").unwrap().is_anchor());
/// ```
#[derive(Clone, Debug)]
pub struct YamlConfig {
    /// Reject content after a `...` end marker and other tolerable slop.
    pub strict: bool,
    /// Spaces per block nesting level on output.
    pub indent: usize,
    /// Resolve aliases at read time or keep wrapper elements.
    pub anchors: AnchorMode,
    /// When `true`, a repeated mapping key keeps the last value instead of
    /// failing.
    pub allow_duplicate_keys: bool,
    /// Sequences/mappings with at most this many entries, all scalar, render
    /// in flow style (`[1, 2, 3]`) on output.
    pub simplify: usize,
}

impl Default for YamlConfig {
    fn default() -> Self {
        YamlConfig {
            strict: true,
            indent: 2,
            anchors: AnchorMode::Resolve,
            allow_duplicate_keys: false,
            simplify: 0,
        }
    }
}

impl YamlConfig {
    /// Creates the default configuration (strict, 2-space indent, aliases
    /// resolved, duplicate keys rejected, no flow collapsing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict mode for reading.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the output indent width in spaces.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the anchor handling mode.
    #[must_use]
    pub fn with_anchors(mut self, anchors: AnchorMode) -> Self {
        self.anchors = anchors;
        self
    }

    /// Tolerates duplicate mapping keys (last value wins).
    #[must_use]
    pub fn with_allow_duplicate_keys(mut self, allow: bool) -> Self {
        self.allow_duplicate_keys = allow;
        self
    }

    /// Sets the flow-collapse threshold for small scalar collections.
    #[must_use]
    pub fn with_simplify(mut self, threshold: usize) -> Self {
        self.simplify = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults() {
        let config = JsonConfig::new();
        assert!(config.strict);
        assert!(config.pretty);
        assert_eq!(config.indent, "  ");
    }

    #[test]
    fn test_json_compact() {
        let config = JsonConfig::compact();
        assert!(!config.pretty);
    }

    #[test]
    fn test_builder_chaining() {
        let config = JsonConfig::new()
            .with_strict(false)
            .with_indent("\t")
            .with_simplify_arrays(10);
        assert!(!config.strict);
        assert_eq!(config.indent, "\t");
        assert_eq!(config.simplify_arrays, 10);
    }

    #[test]
    fn test_yaml_defaults() {
        let config = YamlConfig::new();
        assert_eq!(config.anchors, AnchorMode::Resolve);
        assert!(!config.allow_duplicate_keys);
    }

    #[test]
    fn test_toml_defaults() {
        let config = TomlConfig::new();
        assert!(config.strict);
        assert_eq!(config.indent, "    ");
        assert_eq!(config.datetime_style, DateTimeStyle::Rfc3339);
    }

    #[test]
    fn test_default_matches_new() {
        assert!(JsonConfig::default().strict);
        assert!(TomlConfig::default().strict);
        assert_eq!(TomlConfig::default().indent, "    ");
        assert!(YamlConfig::default().strict);
    }
}
