//! The flat configuration mapping consumed by templates.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::option::OptionValue;

/// A value in a configuration mapping.
///
/// Strings and integers may be substituted into placeholders. Booleans,
/// strings and integers may drive directives. Lists are carried but
/// rejected by both productions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A boolean flag.
    Boolean(bool),
    /// A signed integer.
    Integer(i64),
    /// A string, emitted verbatim.
    String(String),
    /// A list of strings.
    List(Vec<String>),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "{}", crate::option::literal::render(items)),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<OptionValue> for ConfigValue {
    fn from(value: OptionValue) -> Self {
        match value {
            OptionValue::String(s) => Self::String(s),
            OptionValue::Boolean(b) => Self::Boolean(b),
            OptionValue::StringArray(items) => Self::List(items),
        }
    }
}

/// Identifier to value mapping used when rendering a template.
///
/// # Examples
///
/// ```
/// use buildconf::{ConfigValue, ConfigurationData};
///
/// let mut data = ConfigurationData::new();
/// data.set("VERSION", "1.2.0");
/// data.set("HAVE_ZLIB", true);
/// assert_eq!(data.get("VERSION"), Some(&ConfigValue::from("1.2.0")));
///
/// let parsed = ConfigurationData::from_yaml_str("HAVE_ZLIB: true\nJOBS: 4\n").unwrap();
/// assert_eq!(parsed.get("JOBS"), Some(&ConfigValue::Integer(4)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationData {
    values: HashMap<String, ConfigValue>,
}

impl ConfigurationData {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a mapping from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the document is not a flat mapping of
    /// supported values.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::InvalidData {
            format: "yaml",
            message: e.to_string(),
        })
    }

    /// Parses a mapping from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the object is not a flat mapping of
    /// supported values.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidData {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Sets a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Looks up a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    /// Returns `true` if the mapping has a value for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes a value, returning it.
    pub fn remove(&mut self, name: &str) -> Option<ConfigValue> {
        self.values.remove(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigurationData
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut data = ConfigurationData::new();
        assert!(data.is_empty());
        data.set("NAME", "x");
        data.set("COUNT", 3);
        data.set("NAME", "y");
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("NAME"), Some(&ConfigValue::String("y".to_string())));
        assert_eq!(data.get("COUNT"), Some(&ConfigValue::Integer(3)));
        assert!(!data.contains("MISSING"));
        assert_eq!(data.remove("COUNT"), Some(ConfigValue::Integer(3)));
        assert!(!data.contains("COUNT"));
    }

    #[test]
    fn test_yaml_value_kinds() {
        let data = ConfigurationData::from_yaml_str(
            "FLAG: false\nCOUNT: -2\nNAME: demo\nQUOTED: \"42\"\nLIST: [a, b]\n",
        )
        .unwrap();
        assert_eq!(data.get("FLAG"), Some(&ConfigValue::Boolean(false)));
        assert_eq!(data.get("COUNT"), Some(&ConfigValue::Integer(-2)));
        assert_eq!(data.get("NAME"), Some(&ConfigValue::from("demo")));
        assert_eq!(data.get("QUOTED"), Some(&ConfigValue::from("42")));
        assert_eq!(
            data.get("LIST"),
            Some(&ConfigValue::List(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_json_object() {
        let data = ConfigurationData::from_json_str(r#"{"HAVE_X": true, "JOBS": 8}"#).unwrap();
        assert_eq!(data.get("HAVE_X"), Some(&ConfigValue::Boolean(true)));
        assert_eq!(data.get("JOBS"), Some(&ConfigValue::Integer(8)));
    }

    #[test]
    fn test_invalid_data() {
        let err = ConfigurationData::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidData { format: "json", .. }));

        let err = ConfigurationData::from_yaml_str("NESTED: {a: 1}\n").unwrap_err();
        assert!(format!("{err}").starts_with("invalid yaml configuration data"));
    }

    #[test]
    fn test_from_option_value() {
        assert_eq!(
            ConfigValue::from(OptionValue::Boolean(true)),
            ConfigValue::Boolean(true)
        );
        assert_eq!(
            ConfigValue::from(OptionValue::StringArray(vec!["-g".to_string()])),
            ConfigValue::List(vec!["-g".to_string()])
        );
    }

    #[test]
    fn test_from_iterator_and_display() {
        let data: ConfigurationData = [("A", ConfigValue::from(1)), ("B", ConfigValue::from("b"))]
            .into_iter()
            .collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("A").unwrap().to_string(), "1");
        assert_eq!(
            ConfigValue::List(vec!["x".to_string()]).to_string(),
            "['x']"
        );
    }
}
