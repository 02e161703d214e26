use crate::cli::CommonArgs;
use crate::git::{fetch_log, LogFilter, ProgressBoard, ProgressSink, ResolveOptions};
use crate::model::CommitRecord;
use crate::util::is_url;
use anyhow::Context;
use rayon::prelude::*;

/// Read the commit log of every repository, one task per repository.
///
/// Logs come back in the same order as `repos`. Any failure aborts the whole batch.
pub fn fetch_logs(repos: &[String], common: &CommonArgs) -> anyhow::Result<Vec<Vec<CommitRecord>>> {
    let board = ProgressBoard::new(!common.quiet);
    let filter = LogFilter {
        path: common.path.clone(),
    };

    let logs = repos
        .par_iter()
        .map(|repo| {
            let bar = if is_url(repo) { board.bar(repo) } else { None };
            let options = ResolveOptions {
                reference: common.reference.as_deref(),
                progress: bar.as_ref().map(|b| b as &dyn ProgressSink),
            };

            let log = fetch_log(repo, &options, &filter)
                .with_context(|| format!("Failed to read the commit log of {repo}"));
            if let Some(bar) = bar {
                bar.finish_and_clear();
            }
            log
        })
        .collect::<anyhow::Result<Vec<_>>>();

    board.clear();
    logs
}

pub fn fetch_one(repo: &str, common: &CommonArgs) -> anyhow::Result<Vec<CommitRecord>> {
    let mut logs = fetch_logs(&[repo.to_string()], common)?;
    Ok(logs.pop().unwrap_or_default())
}
