//! Typed build options.
//!
//! Every option carries one of four variants: a free string, a boolean, a
//! combo restricted to a fixed set of choices, or a list of strings. Each
//! variant validates raw input the same way regardless of where the option
//! lives (builtin, project or compiler partition), and renders its current
//! value for display.
//!
//! # Examples
//!
//! ```
//! use buildconf::option::{RawValue, UserOption};
//!
//! let mut opt = UserOption::combo(
//!     "backend",
//!     "Backend to use",
//!     vec!["ninja".to_string(), "make".to_string()],
//!     "ninja",
//! )
//! .unwrap();
//!
//! opt.set(&RawValue::from("make")).unwrap();
//! assert_eq!(opt.render(), "make");
//! assert!(opt.set(&RawValue::from("vs")).is_err());
//! ```

pub mod literal;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use literal::LiteralError;

/// Raw, not yet validated input for an option.
///
/// Command-line assignments always arrive as [`RawValue::Text`]; declaration
/// sources may also provide native booleans and structured lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A native boolean.
    Boolean(bool),
    /// Textual input.
    Text(String),
    /// An already-structured list.
    List(Vec<RawValue>),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value.into_iter().map(Self::Text).collect())
    }
}

/// A validated option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Value of a string or combo option.
    String(String),
    /// Value of a boolean option.
    Boolean(bool),
    /// Value of a string array option.
    StringArray(Vec<String>),
}

impl OptionValue {
    /// Renders the value for display.
    ///
    /// Booleans always render as `true` or `false`; string arrays render as a
    /// list literal.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Boolean(b) => render_bool(*b).to_string(),
            Self::StringArray(items) => literal::render(items),
        }
    }
}

/// Kind tag of an option, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Free-form string.
    String,
    /// `true` or `false`.
    Boolean,
    /// One of a fixed set of strings.
    Combo,
    /// A list of strings.
    StringArray,
}

/// The closed set of option variants, each holding its current value and
/// only the data its validation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionVariant {
    /// Accepts any text. `choices` is informational.
    String {
        /// Current value.
        value: String,
        /// Informational list of suggested values.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        choices: Vec<String>,
    },
    /// Accepts `true` or `false`.
    Boolean {
        /// Current value.
        value: bool,
    },
    /// Accepts exact members of `choices`.
    Combo {
        /// Current value.
        value: String,
        /// Allowed values in declaration order.
        choices: Vec<String>,
    },
    /// Accepts a list of strings. `choices` is informational.
    StringArray {
        /// Current value.
        value: Vec<String>,
        /// Informational list of suggested elements.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        choices: Vec<String>,
    },
}

impl OptionVariant {
    /// Returns the kind tag of this variant.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        match self {
            Self::String { .. } => OptionKind::String,
            Self::Boolean { .. } => OptionKind::Boolean,
            Self::Combo { .. } => OptionKind::Combo,
            Self::StringArray { .. } => OptionKind::StringArray,
        }
    }

    /// Validates raw input against this variant without storing it.
    ///
    /// `option` is only used to name the option in error messages.
    ///
    /// # Errors
    ///
    /// Returns the variant's validation error (`InvalidString`,
    /// `InvalidBoolean`, `InvalidChoice`, `MalformedArray` or
    /// `NonStringElement`).
    pub fn validate(&self, option: &str, raw: &RawValue) -> Result<OptionValue> {
        match self {
            Self::String { .. } => validate_string(option, raw).map(OptionValue::String),
            Self::Boolean { .. } => validate_boolean(option, raw).map(OptionValue::Boolean),
            Self::Combo { choices, .. } => {
                validate_choice(option, choices, raw).map(OptionValue::String)
            }
            Self::StringArray { .. } => {
                validate_string_array(option, raw).map(OptionValue::StringArray)
            }
        }
    }

    /// Validates raw input and, on success, makes it the current value.
    ///
    /// # Errors
    ///
    /// Same as [`OptionVariant::validate`]; the current value is unchanged on
    /// error.
    pub fn set(&mut self, option: &str, raw: &RawValue) -> Result<()> {
        match self {
            Self::String { value, .. } => *value = validate_string(option, raw)?,
            Self::Boolean { value } => *value = validate_boolean(option, raw)?,
            Self::Combo { value, choices } => *value = validate_choice(option, choices, raw)?,
            Self::StringArray { value, .. } => *value = validate_string_array(option, raw)?,
        }
        Ok(())
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn value(&self) -> OptionValue {
        match self {
            Self::String { value, .. } | Self::Combo { value, .. } => {
                OptionValue::String(value.clone())
            }
            Self::Boolean { value } => OptionValue::Boolean(*value),
            Self::StringArray { value, .. } => OptionValue::StringArray(value.clone()),
        }
    }

    /// Renders the current value for display.
    #[must_use]
    pub fn render(&self) -> String {
        self.value().render()
    }

    /// Returns true if both variants have the same kind and the same choices,
    /// whatever their current values.
    #[must_use]
    pub fn same_declaration(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean { .. }, Self::Boolean { .. }) => true,
            (Self::String { choices: a, .. }, Self::String { choices: b, .. })
            | (Self::Combo { choices: a, .. }, Self::Combo { choices: b, .. })
            | (
                Self::StringArray { choices: a, .. },
                Self::StringArray { choices: b, .. },
            ) => a == b,
            _ => false,
        }
    }

    /// Renders the allowed values for display, or an empty string if the
    /// variant has none.
    #[must_use]
    pub fn allowed_values(&self) -> String {
        match self {
            Self::Boolean { .. } => "[true, false]".to_string(),
            Self::Combo { choices, .. } => literal::render(choices),
            Self::String { choices, .. } | Self::StringArray { choices, .. } => {
                if choices.is_empty() {
                    String::new()
                } else {
                    literal::render(choices)
                }
            }
        }
    }

    /// Checks that the current value satisfies the variant's own rule.
    fn check(&self, option: &str) -> Result<()> {
        if let Self::Combo { value, choices } = self {
            if choices.is_empty() {
                return Err(Error::InvalidDeclaration {
                    option: option.to_string(),
                    reason: "combo options need at least one choice".to_string(),
                });
            }
            validate_choice(option, choices, &RawValue::Text(value.clone()))?;
        }
        Ok(())
    }
}

/// A named, described option whose value always satisfies its variant.
///
/// Deserialization re-validates the stored value, so an option read back from
/// a snapshot obeys the same invariant as one built in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OptionRecord")]
pub struct UserOption {
    name: String,
    description: String,
    variant: OptionVariant,
}

/// Unvalidated on-disk shape of a [`UserOption`].
#[derive(Deserialize)]
struct OptionRecord {
    name: String,
    description: String,
    variant: OptionVariant,
}

impl TryFrom<OptionRecord> for UserOption {
    type Error = Error;

    fn try_from(record: OptionRecord) -> Result<Self> {
        Self::new(record.name, record.description, record.variant)
    }
}

impl UserOption {
    /// Creates an option from a variant, checking that the variant's current
    /// value is valid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDeclaration` for a combo without choices and
    /// `InvalidChoice` for a combo whose value is not one of its choices.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        variant: OptionVariant,
    ) -> Result<Self> {
        let name = name.into();
        variant.check(&name)?;
        Ok(Self {
            name,
            description: description.into(),
            variant,
        })
    }

    /// Creates an option from a variant known to be valid.
    pub(crate) fn trusted(
        name: impl Into<String>,
        description: impl Into<String>,
        variant: OptionVariant,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant,
        }
    }

    /// Creates a string option.
    #[must_use]
    pub fn string(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant: OptionVariant::String {
                value: value.into(),
                choices: Vec::new(),
            },
        }
    }

    /// Creates a boolean option.
    #[must_use]
    pub fn boolean(name: impl Into<String>, description: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant: OptionVariant::Boolean { value },
        }
    }

    /// Creates a combo option.
    ///
    /// # Errors
    ///
    /// Returns an error if `choices` is empty or `value` is not one of them.
    pub fn combo(
        name: impl Into<String>,
        description: impl Into<String>,
        choices: Vec<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            name,
            description,
            OptionVariant::Combo {
                value: value.into(),
                choices,
            },
        )
    }

    /// Creates a string array option.
    #[must_use]
    pub fn string_array(
        name: impl Into<String>,
        description: impl Into<String>,
        value: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variant: OptionVariant::StringArray {
                value,
                choices: Vec::new(),
            },
        }
    }

    /// Attaches informational choices to a string or string array option.
    ///
    /// Has no effect on boolean and combo options, whose choices are fixed.
    #[must_use]
    pub fn with_choices(mut self, suggestions: Vec<String>) -> Self {
        if let OptionVariant::String { choices, .. } | OptionVariant::StringArray { choices, .. } =
            &mut self.variant
        {
            *choices = suggestions;
        }
        self
    }

    /// Returns the option name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the kind tag.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        self.variant.kind()
    }

    /// Returns the variant with its current value.
    #[must_use]
    pub const fn variant(&self) -> &OptionVariant {
        &self.variant
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn value(&self) -> OptionValue {
        self.variant.value()
    }

    /// Validates raw input against this option without storing it.
    ///
    /// # Errors
    ///
    /// Returns the variant's validation error.
    pub fn validate(&self, raw: &RawValue) -> Result<OptionValue> {
        self.variant.validate(&self.name, raw)
    }

    /// Validates raw input and stores it as the current value.
    ///
    /// # Errors
    ///
    /// Returns the variant's validation error; the value is unchanged.
    pub fn set(&mut self, raw: &RawValue) -> Result<()> {
        self.variant.set(&self.name, raw)
    }

    /// Renders the current value for display.
    #[must_use]
    pub fn render(&self) -> String {
        self.variant.render()
    }

    /// Renders the allowed values for display.
    #[must_use]
    pub fn allowed_values(&self) -> String {
        self.variant.allowed_values()
    }
}

/// Parses a boolean literal, matching only the exact lowercase tokens.
///
/// Declaration sources use this when other casings must be rejected.
///
/// # Errors
///
/// Returns `InvalidBoolean` for anything other than `true` or `false`.
///
/// # Examples
///
/// ```
/// use buildconf::option::parse_strict_bool;
///
/// assert!(parse_strict_bool("opt", "true").unwrap());
/// assert!(parse_strict_bool("opt", "True").is_err());
/// ```
pub fn parse_strict_bool(option: &str, text: &str) -> Result<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::InvalidBoolean {
            option: option.to_string(),
            value: text.to_string(),
        }),
    }
}

const fn render_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn validate_string(option: &str, raw: &RawValue) -> Result<String> {
    match raw {
        RawValue::Text(text) => Ok(text.clone()),
        other => Err(Error::InvalidString {
            option: option.to_string(),
            value: other.to_string(),
        }),
    }
}

fn validate_boolean(option: &str, raw: &RawValue) -> Result<bool> {
    match raw {
        RawValue::Boolean(b) => Ok(*b),
        RawValue::Text(text) if text.eq_ignore_ascii_case("true") => Ok(true),
        RawValue::Text(text) if text.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(Error::InvalidBoolean {
            option: option.to_string(),
            value: other.to_string(),
        }),
    }
}

fn validate_choice(option: &str, choices: &[String], raw: &RawValue) -> Result<String> {
    if let RawValue::Text(text) = raw {
        if choices.iter().any(|choice| choice == text) {
            return Ok(text.clone());
        }
    }
    let quoted: Vec<String> = choices.iter().map(|c| format!("\"{c}\"")).collect();
    Err(Error::InvalidChoice {
        option: option.to_string(),
        value: raw.to_string(),
        choices: quoted.join(", "),
    })
}

fn validate_string_array(option: &str, raw: &RawValue) -> Result<Vec<String>> {
    match raw {
        RawValue::Text(text) => {
            if !text.starts_with('[') {
                return Err(Error::MalformedArray {
                    option: option.to_string(),
                    value: text.clone(),
                });
            }
            literal::parse(text).map_err(|e| match e {
                LiteralError::Malformed => Error::MalformedArray {
                    option: option.to_string(),
                    value: text.clone(),
                },
                LiteralError::NonString(element) => Error::NonStringElement {
                    option: option.to_string(),
                    element,
                },
            })
        }
        RawValue::List(items) => items
            .iter()
            .map(|item| match item {
                RawValue::Text(text) => Ok(text.clone()),
                other => Err(Error::NonStringElement {
                    option: option.to_string(),
                    element: other.to_string(),
                }),
            })
            .collect(),
        RawValue::Boolean(_) => Err(Error::MalformedArray {
            option: option.to_string(),
            value: raw.to_string(),
        }),
    }
}
