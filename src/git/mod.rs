pub mod clone;
pub mod locate;
pub mod progress;
pub mod repo;

pub use locate::{resolve, ResolvedRepo};
pub use progress::{ProgressBoard, ProgressEvent, ProgressSink, ResolveOptions};
pub use repo::{GitRepo, LogFilter};

use crate::error::Result;
use crate::model::CommitRecord;
use std::path::Path;

/// Resolve `identifier`, read its commit log and release any temporary clone.
pub fn fetch_log(
    identifier: &str,
    options: &ResolveOptions<'_>,
    filter: &LogFilter,
) -> Result<Vec<CommitRecord>> {
    let resolved = resolve(identifier, options)?;
    let log = GitRepo::open(resolved.path())?.log(filter)?;
    resolved.cleanup()?;
    Ok(log)
}

/// Whether writing to `path` would replace an existing file.
pub fn would_overwrite(path: &Path) -> bool {
    path.exists()
}
