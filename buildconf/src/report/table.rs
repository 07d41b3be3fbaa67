//! Column-aligned option tables.

use crate::option::UserOption;

const NAME_TITLE: &str = "Option";
const DESCRIPTION_TITLE: &str = "Description";
const VALUE_TITLE: &str = "Current Value";
const ALLOWED_TITLE: &str = "Possible Values";

/// One row of an option table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Option name.
    pub name: String,
    /// Human description.
    pub description: String,
    /// Rendered current value.
    pub value: String,
    /// Rendered allowed values, empty if there are none to show.
    pub allowed: String,
}

impl TableRow {
    /// Builds a row showing the option's allowed values.
    #[must_use]
    pub fn with_allowed(option: &UserOption) -> Self {
        Self {
            allowed: option.allowed_values(),
            ..Self::without_allowed(option)
        }
    }

    /// Builds a row with an empty allowed-values cell.
    #[must_use]
    pub fn without_allowed(option: &UserOption) -> Self {
        Self {
            name: option.name().to_string(),
            description: option.description().to_string(),
            value: option.render(),
            allowed: String::new(),
        }
    }
}

/// Formats rows as a header line, a dash rule and one line per row.
///
/// Each of the first three columns is padded to the widest cell or header in
/// that column. The allowed-values header only appears when some row has a
/// non-empty allowed-values cell. Lines are indented by two spaces and carry
/// no trailing whitespace. An empty slice produces no lines.
///
/// # Examples
///
/// ```
/// use buildconf::report::{format_aligned, TableRow};
///
/// let rows = vec![TableRow {
///     name: "strip".to_string(),
///     description: "Strip on install".to_string(),
///     value: "false".to_string(),
///     allowed: "[true, false]".to_string(),
/// }];
/// let lines = format_aligned(&rows);
/// assert_eq!(lines[0], "  Option Description      Current Value Possible Values");
/// assert_eq!(lines[1], "  ------ -----------      ------------- ---------------");
/// assert_eq!(lines[2], "  strip  Strip on install false         [true, false]");
/// ```
#[must_use]
pub fn format_aligned(rows: &[TableRow]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    let name_width = column_width(rows, NAME_TITLE, |r| r.name.as_str());
    let description_width = column_width(rows, DESCRIPTION_TITLE, |r| r.description.as_str());
    let value_width = column_width(rows, VALUE_TITLE, |r| r.value.as_str());

    let allowed_title = if rows.iter().any(|row| !row.allowed.is_empty()) {
        ALLOWED_TITLE
    } else {
        ""
    };

    let line = |name: &str, description: &str, value: &str, allowed: &str| {
        let mut line =
            format!("  {name:<name_width$} {description:<description_width$} {value}");
        if !allowed.is_empty() {
            let pad = value_width - value.chars().count();
            line.push_str(&" ".repeat(pad + 1));
            line.push_str(allowed);
        }
        line
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(NAME_TITLE, DESCRIPTION_TITLE, VALUE_TITLE, allowed_title));
    lines.push(line(
        &"-".repeat(NAME_TITLE.len()),
        &"-".repeat(DESCRIPTION_TITLE.len()),
        &"-".repeat(VALUE_TITLE.len()),
        &"-".repeat(allowed_title.len()),
    ));
    for row in rows {
        lines.push(line(&row.name, &row.description, &row.value, &row.allowed));
    }
    lines
}

fn column_width(rows: &[TableRow], title: &str, cell: impl Fn(&TableRow) -> &str) -> usize {
    rows.iter()
        .map(|row| cell(row).chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0)
}
