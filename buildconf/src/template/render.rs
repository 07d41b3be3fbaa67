//! Line-level template rendering.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

use super::data::{ConfigValue, ConfigurationData};

/// Directive marker used when none is configured.
pub const DEFAULT_DIRECTIVE_MARKER: &str = "#confdefine";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([-A-Za-z0-9_]+)@").expect("valid placeholder pattern"));

/// Renders template text against a configuration mapping.
///
/// Every line is either a directive line, starting with the directive
/// marker, or a substitution line in which `@NAME@` placeholders are
/// replaced.
///
/// # Examples
///
/// ```
/// use buildconf::{ConfigurationData, TemplateRenderer};
///
/// let mut data = ConfigurationData::new();
/// data.set("NAME", "x");
/// data.set("COUNT", 3);
/// data.set("HAVE_FOO", true);
///
/// let renderer = TemplateRenderer::new();
/// assert_eq!(renderer.render_line("@NAME@-@COUNT@", &data).unwrap(), "x-3");
/// assert_eq!(
///     renderer.render_line("#confdefine HAVE_FOO\n", &data).unwrap(),
///     "#define HAVE_FOO\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRenderer {
    marker: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a renderer using [`DEFAULT_DIRECTIVE_MARKER`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_directive_marker(DEFAULT_DIRECTIVE_MARKER)
    }

    /// Creates a renderer recognizing directives by a custom marker.
    #[must_use]
    pub fn with_directive_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Returns the directive marker.
    #[must_use]
    pub fn directive_marker(&self) -> &str {
        &self.marker
    }

    /// Renders a whole text, line by line.
    ///
    /// Line terminators of substitution lines are kept as they are; directive
    /// lines always end with `\n`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`render_line`](Self::render_line).
    pub fn render_str(&self, text: &str, data: &ConfigurationData) -> Result<String> {
        let mut output = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            output.push_str(&self.render_line(line, data)?);
        }
        Ok(output)
    }

    /// Renders one line, including its terminator if it has one.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDirective` or `UnsupportedDefineType` for bad
    /// directive lines, `UnsupportedSubstitutionType` if a placeholder names
    /// a boolean or list value, and `RecursiveSubstitution` if expanding a
    /// placeholder brings the same placeholder back.
    pub fn render_line(&self, line: &str, data: &ConfigurationData) -> Result<String> {
        if line.starts_with(self.marker.as_str()) {
            self.render_directive(line, data)
        } else {
            substitute(line, data)
        }
    }

    fn render_directive(&self, line: &str, data: &ConfigurationData) -> Result<String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [_, name] = tokens.as_slice() else {
            return Err(Error::MalformedDirective {
                marker: self.marker.clone(),
                line: line.trim().to_string(),
            });
        };

        let rendered = match data.get(name) {
            None => format!("/* undef {name} */"),
            Some(ConfigValue::Boolean(true)) => format!("#define {name}"),
            Some(ConfigValue::Boolean(false)) => format!("#undef {name}"),
            Some(ConfigValue::Integer(value)) => format!("#define {name} {value}"),
            Some(ConfigValue::String(value)) => format!("#define {name} {value}"),
            Some(ConfigValue::List(_)) => {
                return Err(Error::UnsupportedDefineType {
                    marker: self.marker.clone(),
                    name: (*name).to_string(),
                })
            }
        };
        Ok(rendered + "\n")
    }
}

/// Replaces placeholders until none is left on the line.
///
/// After each replacement the leftmost placeholder of the rewritten line is
/// located again, so values may themselves contain placeholders. All
/// occurrences of a name are replaced at once; meeting the same name again
/// later means its expansion loops, which is an error.
fn substitute(line: &str, data: &ConfigurationData) -> Result<String> {
    let mut output = line.to_string();
    let mut expanded: HashSet<String> = HashSet::new();
    while let Some(name) = PLACEHOLDER
        .captures(&output)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
    {
        if !expanded.insert(name.clone()) {
            return Err(Error::RecursiveSubstitution { name });
        }
        let replacement = match data.get(&name) {
            None => String::new(),
            Some(ConfigValue::String(value)) => value.clone(),
            Some(ConfigValue::Integer(value)) => value.to_string(),
            Some(ConfigValue::Boolean(_) | ConfigValue::List(_)) => {
                return Err(Error::UnsupportedSubstitutionType { name })
            }
        };
        output = output.replace(&format!("@{name}@"), &replacement);
    }
    Ok(output)
}
