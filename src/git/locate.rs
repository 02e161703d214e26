use crate::error::{Result, VizError};
use crate::git::clone::clone_into;
use crate::git::progress::ResolveOptions;
use crate::util::is_url;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

pub const TEMP_PREFIX: &str = "git-visualize-";

/// A working directory ready for reading the commit log.
///
/// Cloned repositories own their temporary directory, which is removed by
/// [`ResolvedRepo::cleanup`] or, failing that, when the value is dropped.
/// Local paths are borrowed from the caller and never deleted.
#[derive(Debug)]
pub struct ResolvedRepo {
    path: PathBuf,
    temp: Option<TempDir>,
}

impl ResolvedRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_owned(&self) -> bool {
        self.temp.is_some()
    }

    pub fn cleanup(mut self) -> Result<()> {
        if let Some(temp) = self.temp.take() {
            debug!(dir = %self.path.display(), "removing temporary clone");
            if temp.path().exists() {
                temp.close()?;
            }
        }
        Ok(())
    }
}

/// Turn a URL or local path into a directory containing a Git working copy.
pub fn resolve(identifier: &str, options: &ResolveOptions<'_>) -> Result<ResolvedRepo> {
    if is_url(identifier) {
        let temp = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
        let path = temp.path().to_path_buf();
        info!(url = identifier, dir = %path.display(), "cloning repository");

        // `temp` is dropped, and the directory removed, if cloning fails.
        clone_into(identifier, &path, options.reference, options.progress)?;

        return Ok(ResolvedRepo {
            path,
            temp: Some(temp),
        });
    }

    let path = PathBuf::from(identifier);
    if !path.exists() {
        return Err(VizError::NotFound(path));
    }
    if !path.join(".git").is_dir() {
        return Err(VizError::NotAGitRepository(path));
    }

    info!(dir = %path.display(), "using local repository");
    Ok(ResolvedRepo { path, temp: None })
}
