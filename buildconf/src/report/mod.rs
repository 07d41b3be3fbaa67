//! Human-readable report of a build directory's configuration.
//!
//! The report is a fixed sequence of sections separated by blank lines:
//! core properties, core options, compiler and linker arguments, compiler
//! options, install directories and finally the project's own options.

mod table;

use std::io::Write;

use crate::builtins::{CORE_OPTIONS, DIRECTORY_OPTIONS};
use crate::option::{literal, UserOption};
use crate::snapshot::{BuildDescription, SnapshotStore};
use crate::store::OptionStore;
use crate::Result;

pub use table::{format_aligned, TableRow};

/// Renders an option store and its build description.
///
/// # Examples
///
/// ```
/// use buildconf::report::Reporter;
/// use buildconf::snapshot::BuildDescription;
/// use buildconf::store::OptionStore;
///
/// let store = OptionStore::new();
/// let build = BuildDescription::new("/src", "/src/build");
/// let lines = Reporter::new(&store, &build).lines();
/// assert_eq!(lines[0], "Core properties:");
/// assert_eq!(lines[1], "  Source dir /src");
/// assert_eq!(lines[2], "  Build dir  /src/build");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reporter<'a> {
    store: &'a OptionStore,
    build: &'a BuildDescription,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter over a store and build description.
    #[must_use]
    pub const fn new(store: &'a OptionStore, build: &'a BuildDescription) -> Self {
        Self { store, build }
    }

    /// Creates a reporter over a loaded snapshot.
    #[must_use]
    pub const fn from_snapshot(snapshot: &'a SnapshotStore) -> Self {
        Self::new(snapshot.store(), snapshot.build_description())
    }

    /// Produces the report as lines without line terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let sections = [
            self.core_properties(),
            self.builtin_table("Core options:", &CORE_OPTIONS, TableRow::with_allowed),
            Self::argument_section("Compiler arguments:", "args", self.store.all_compile_args()),
            Self::argument_section("Linker args:", "linkargs", self.store.all_link_args()),
            Self::option_table(
                "Compiler options:",
                self.store
                    .compiler_options()
                    .map(TableRow::without_allowed)
                    .collect(),
                "  No compiler options",
            ),
            self.builtin_table("Directories:", &DIRECTORY_OPTIONS, TableRow::without_allowed),
            Self::option_table(
                "Project options:",
                self.store
                    .user_options()
                    .map(TableRow::with_allowed)
                    .collect(),
                "  This project does not have any options",
            ),
        ];

        let mut lines = Vec::new();
        for (index, section) in sections.into_iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.extend(section);
        }
        lines
    }

    /// Writes the report, one line at a time.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn core_properties(&self) -> Vec<String> {
        let environment = &self.build.environment;
        vec![
            "Core properties:".to_string(),
            format!("  Source dir {}", environment.source_dir.display()),
            format!("  Build dir  {}", environment.build_dir.display()),
        ]
    }

    fn builtin_table(
        &self,
        title: &str,
        names: &[&str],
        row: fn(&UserOption) -> TableRow,
    ) -> Vec<String> {
        let rows: Vec<TableRow> = names
            .iter()
            .filter_map(|name| self.store.builtin(name))
            .map(row)
            .collect();
        let mut lines = vec![title.to_string()];
        lines.extend(format_aligned(&rows));
        lines
    }

    fn argument_section<'s>(
        title: &str,
        suffix: &str,
        args: impl Iterator<Item = (&'s str, &'s [String])>,
    ) -> Vec<String> {
        let mut lines = vec![title.to_string()];
        lines.extend(
            args.map(|(language, values)| {
                format!("  {language}{suffix} {}", literal::render(values))
            }),
        );
        lines
    }

    fn option_table(title: &str, rows: Vec<TableRow>, empty: &str) -> Vec<String> {
        let mut lines = vec![title.to_string()];
        if rows.is_empty() {
            lines.push(empty.to_string());
        } else {
            lines.extend(format_aligned(&rows));
        }
        lines
    }
}
