#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # buildconf
//!
//! Build option configuration for a build tool.
//!
//! This library stores, validates, reports and persists the named options of
//! a configured build directory, and renders configuration values into
//! generated files.
//!
//! ## Core Types
//!
//! - [`UserOption`] and [`OptionVariant`]: typed options with validation
//! - [`OptionStore`]: builtin, project and compiler options plus per-language
//!   argument lists
//! - [`SnapshotStore`]: the persisted configuration of a build directory
//! - [`Reporter`]: aligned human-readable option tables
//! - [`TemplateRenderer`] and [`ConfigurationData`]: generated file rendering
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use buildconf::{OptionStore, RawValue};
//!
//! let mut store = OptionStore::new();
//! store.register_language("c");
//! store.assign_batch(&["werror=true", "cargs=-O2 -g"]).unwrap();
//!
//! assert_eq!(store.get("werror").unwrap().render(), "true");
//! assert_eq!(store.compile_args("c").unwrap(), ["-O2", "-g"]);
//! assert!(store.assign("buildtype", &RawValue::from("fast")).is_err());
//! ```

pub mod builtins;
pub mod error;
pub mod logging;
pub mod option;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod template;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use option::{OptionKind, OptionValue, OptionVariant, RawValue, UserOption};
pub use report::Reporter;
pub use snapshot::{BuildDescription, BuildEnvironment, SnapshotStore};
pub use store::OptionStore;
pub use template::{
    render_file, ConfigValue, ConfigurationData, TemplateRenderer, WriteOutcome,
};
