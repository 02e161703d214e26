use crate::error::{Result, VizError};
use crate::model::CommitRecord;
use gix::{ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Restricts which commits the log yields.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Only keep commits that changed this file or directory.
    pub path: Option<String>,
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository whose working copy is `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = gix::open(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every commit reachable from `HEAD`, newest author time first.
    pub fn log(&self, filter: &LogFilter) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            debug!(repo = %self.path.display(), "HEAD is unborn, empty log");
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut records = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            let keep = match filter.path.as_deref() {
                Some(path) => self.touches_path(&commit, parents.first().copied(), path)?,
                None => true,
            };

            if keep {
                let author = commit.author()?;
                let author_timestamp = author
                    .time()
                    .map_err(|e| VizError::InvalidDate(format!("Bad author time in {commit_id}: {e}")))?
                    .seconds;

                records.push(CommitRecord {
                    id: commit_id.to_string(),
                    author_name: author.name.to_string(),
                    author_email: author.email.to_string(),
                    author_timestamp,
                    message: commit.message_raw()?.to_string(),
                    parent_ids: parents.iter().map(|id| id.to_string()).collect(),
                });
            }

            stack.extend(parents);
        }

        records.sort_by(|a, b| b.author_timestamp.cmp(&a.author_timestamp));
        debug!(repo = %self.path.display(), commits = records.len(), "collected commit log");
        Ok(records)
    }

    fn touches_path(&self, commit: &gix::Commit<'_>, parent: Option<ObjectId>, path: &str) -> Result<bool> {
        let current = self.entry_at(commit, path)?;
        let previous = match parent {
            Some(parent_id) => {
                let parent = self.repo.find_commit(parent_id)?;
                self.entry_at(&parent, path)?
            }
            None => None,
        };
        Ok(current != previous)
    }

    fn entry_at(&self, commit: &gix::Commit<'_>, path: &str) -> Result<Option<ObjectId>> {
        let tree = commit.tree()?;
        let entry = tree
            .lookup_entry_by_path(path)
            .map_err(|e| VizError::Git(format!("Failed to look up '{path}': {e}")))?;
        Ok(entry.map(|e| e.object_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_rejects_plain_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(GitRepo::open(dir.path()), Err(VizError::Open(_))));
    }
}
