//! Output writer. Filesystem mutation goes through an explicit sink so the
//! pipeline never touches directories behind the caller's back.
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{GenError, Stage};

pub trait OutputSink {
    /// Make sure `dir` exists. Succeeds if it already does.
    fn ensure_location(&self, dir: &Path) -> io::Result<()>;

    /// Replace the full contents of `path`.
    fn replace(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn ensure_location(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn replace(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// Ensure the parent location, then replace the artifact. Not atomic: a
/// failure mid-write may leave the target truncated.
pub fn write_artifact(sink: &dyn OutputSink, path: &Path, contents: &str) -> Result<(), GenError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        sink.ensure_location(parent)
            .map_err(|err| GenError::io(Stage::Write, parent, err))?;
    }
    sink.replace(path, contents)
        .map_err(|err| GenError::io(Stage::Write, path, err))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}
