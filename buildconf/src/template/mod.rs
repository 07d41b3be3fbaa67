//! Template rendering for generated files.
//!
//! A template is processed line by line. Lines that start with the directive
//! marker (`#confdefine` unless configured otherwise) become C preprocessor
//! lines:
//!
//! | mapping value | output |
//! |---|---|
//! | absent | `/* undef NAME */` |
//! | `true` | `#define NAME` |
//! | `false` | `#undef NAME` |
//! | integer or string | `#define NAME value` |
//!
//! Every other line has its `@NAME@` placeholders replaced by the string or
//! integer value of `NAME`, or by nothing if `NAME` is absent. Replacement
//! continues until the line holds no placeholder, so a value may refer to
//! other names; a name that comes back while it is being expanded is an
//! error.
//!
//! Files are written through [`render_file`], which leaves an up-to-date
//! destination untouched so that dependent build steps are not re-run.

mod data;
mod render;
mod write;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use data::{ConfigValue, ConfigurationData};
pub use render::{TemplateRenderer, DEFAULT_DIRECTIVE_MARKER};
pub use write::{render_file, WriteOutcome};
