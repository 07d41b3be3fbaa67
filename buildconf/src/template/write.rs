//! Rendering template files with an idempotent commit.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

use super::data::ConfigurationData;
use super::render::TemplateRenderer;

/// What happened to the destination of a rendered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The destination was created or replaced.
    Written,
    /// The destination already had the rendered contents and was left alone.
    Unchanged,
}

impl TemplateRenderer {
    /// Renders `src` into `dst`.
    ///
    /// The output is written to a temporary file next to `dst` carrying the
    /// permissions of `src`. If `dst` already holds identical bytes the
    /// temporary file is discarded, so the destination's modification time
    /// does not change; otherwise the temporary file replaces `dst`.
    ///
    /// # Errors
    ///
    /// Returns a rendering error from [`render_str`](Self::render_str), or an
    /// I/O error if a file cannot be read, created or replaced. The
    /// destination is untouched on error.
    pub fn render_file(
        &self,
        src: &Path,
        dst: &Path,
        data: &ConfigurationData,
    ) -> Result<WriteOutcome> {
        let template = fs::read_to_string(src)?;
        let output = self.render_str(&template, data)?;

        let directory = match dst.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(directory)?;
        staged.write_all(output.as_bytes())?;
        staged.flush()?;
        let permissions = fs::metadata(src)?.permissions();
        staged.as_file().set_permissions(permissions)?;

        let outcome = replace_if_different(staged, dst, output.as_bytes())?;
        log::debug!(
            "Rendered {} to {} ({outcome:?})",
            src.display(),
            dst.display()
        );
        Ok(outcome)
    }
}

/// Renders `src` into `dst` with the default directive marker.
///
/// # Errors
///
/// See [`TemplateRenderer::render_file`].
///
/// # Examples
///
/// ```
/// use buildconf::{render_file, ConfigurationData, WriteOutcome};
///
/// let dir = tempfile::tempdir().unwrap();
/// let src = dir.path().join("config.h.in");
/// let dst = dir.path().join("config.h");
/// std::fs::write(&src, "#define VERSION \"@VERSION@\"\n#confdefine HAVE_ZLIB\n").unwrap();
///
/// let mut data = ConfigurationData::new();
/// data.set("VERSION", "1.0");
/// data.set("HAVE_ZLIB", true);
///
/// assert_eq!(render_file(&src, &dst, &data).unwrap(), WriteOutcome::Written);
/// assert_eq!(
///     std::fs::read_to_string(&dst).unwrap(),
///     "#define VERSION \"1.0\"\n#define HAVE_ZLIB\n"
/// );
/// assert_eq!(render_file(&src, &dst, &data).unwrap(), WriteOutcome::Unchanged);
/// ```
pub fn render_file(src: &Path, dst: &Path, data: &ConfigurationData) -> Result<WriteOutcome> {
    TemplateRenderer::new().render_file(src, dst, data)
}

fn replace_if_different(
    staged: NamedTempFile,
    dst: &Path,
    contents: &[u8],
) -> Result<WriteOutcome> {
    match fs::read(dst) {
        Ok(existing) if existing == contents => return Ok(WriteOutcome::Unchanged),
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    staged.persist(dst).map_err(|e| e.error)?;
    Ok(WriteOutcome::Written)
}
