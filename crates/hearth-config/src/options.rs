//! Option specifications contributed to a command surface.
//!
//! Extensions and the diagnostics dispatcher describe extra command-line
//! options as data: a name mapped to an [`OptionSpec`]. Whoever owns the
//! concrete parser implements [`OptionSink`] and turns the registrations into
//! real flags. Names and specs are opaque here; nothing in this module
//! interprets an option beyond its declared kind.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Value shape accepted by an option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// A flag that may also take an explicit `=true`/`=false`.
    Boolean,
    /// A single string value.
    #[default]
    String,
    /// A single numeric value.
    Number,
    /// One or more string values.
    Array,
}

impl OptionKind {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Number => "number",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of a single option.
///
/// # Example
///
/// ```
/// use hearth_config::{OptionKind, OptionSpec};
///
/// let spec = OptionSpec::boolean()
///     .with_default(true.into())
///     .with_description("Check for available memory");
/// assert_eq!(spec.kind(), OptionKind::Boolean);
/// assert_eq!(spec.default_literal().as_deref(), Some("true"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OptionSpec {
    #[serde(rename = "type", default)]
    kind: OptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
}

impl OptionSpec {
    /// Creates a spec of the given kind with no default, help, or alias.
    #[must_use]
    pub const fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            default: None,
            description: None,
            alias: None,
        }
    }

    /// Shorthand for a boolean option.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(OptionKind::Boolean)
    }

    /// Shorthand for a string option.
    #[must_use]
    pub const fn string() -> Self {
        Self::new(OptionKind::String)
    }

    /// Shorthand for an array option.
    #[must_use]
    pub const fn array() -> Self {
        Self::new(OptionKind::Array)
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets an alternative long name.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the option kind.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns the declared default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the help text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Renders the default as the literal a command-line parser would accept.
    ///
    /// Arrays, objects, and `null` have no single literal and yield `None`.
    #[must_use]
    pub fn default_literal(&self) -> Option<String> {
        match self.default.as_ref()? {
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Number(number) => Some(number.to_string()),
            Value::String(text) => Some(text.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Parsed value of a registered option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Value of a boolean option.
    Boolean(bool),
    /// Value of a string option.
    String(String),
    /// Value of a numeric option.
    Number(f64),
    /// Values of an array option.
    List(Vec<String>),
}

impl OptionValue {
    /// Returns the boolean payload, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::String(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Receiver of option registrations.
///
/// Implemented by whatever owns the concrete command parser. Registrations
/// arrive in the order they should appear on the command surface.
pub trait OptionSink {
    /// Returns `true` when `name` has already been registered.
    fn contains(&self, name: &str) -> bool;

    /// Registers `name` with the given spec.
    fn register(&mut self, name: &str, spec: &OptionSpec);
}

/// Ordered mapping from option name to spec.
///
/// Deserialises from a JSON object while keeping the declaration order of its
/// keys, which plain maps would lose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionTable {
    entries: Vec<(String, OptionSpec)>,
}

impl OptionTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, replacing the spec of an existing name in place.
    pub fn insert(&mut self, name: impl Into<String>, spec: OptionSpec) {
        let key: String = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = spec;
            return;
        }
        self.entries.push((key, spec));
    }

    /// Looks up the spec registered for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.entries
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, OptionSpec)> for OptionTable {
    fn from_iter<T: IntoIterator<Item = (N, OptionSpec)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (name, spec) in iter {
            table.insert(name, spec);
        }
        table
    }
}

impl Serialize for OptionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, spec) in &self.entries {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OptionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OptionTableVisitor)
    }
}

struct OptionTableVisitor;

impl<'de> Visitor<'de> for OptionTableVisitor {
    type Value = OptionTable;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of option names to option specs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = OptionTable::new();
        while let Some((name, spec)) = access.next_entry::<String, OptionSpec>()? {
            table.insert(name, spec);
        }
        Ok(table)
    }
}
