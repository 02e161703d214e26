use crate::error::{Result, VizError};
use crate::git::progress::{ProgressEvent, ProgressSink};
use gix::progress::tree;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Clone `url` into the empty directory `dir` and check out its worktree.
///
/// The full history is fetched; aggregation depends on every commit being present.
pub fn clone_into(
    url: &str,
    dir: &Path,
    reference: Option<&str>,
    sink: Option<&dyn ProgressSink>,
) -> Result<()> {
    let root = tree::Root::new();
    let finished = AtomicBool::new(false);

    std::thread::scope(|scope| {
        if let Some(sink) = sink {
            let root = &root;
            let finished = &finished;
            scope.spawn(move || forward_progress(root, sink, finished));
        }

        let result = fetch_and_checkout(url, dir, reference, &root);
        finished.store(true, Ordering::Relaxed);
        result
    })
}

fn fetch_and_checkout(url: &str, dir: &Path, reference: Option<&str>, root: &tree::Root) -> Result<()> {
    let interrupt = AtomicBool::new(false);

    let spec = single_branch_refspec(reference);
    debug!(refspec = %spec, "restricting fetch to one branch");
    let mut prepare = gix::prepare_clone(url, dir)?.configure_remote(move |mut remote| {
        remote.replace_refspecs(Some(spec.as_str()), gix::remote::Direction::Fetch)?;
        Ok(remote)
    });
    if let Some(name) = reference {
        prepare = prepare
            .with_ref_name(Some(name))
            .map_err(|e| VizError::Git(format!("Invalid reference '{name}': {e}")))?;
    }

    debug!(url, dir = %dir.display(), "fetching");
    let (mut checkout, _) = prepare.fetch_then_checkout(root.add_child("Fetching"), &interrupt)?;

    debug!(url, "checking out worktree");
    checkout.main_worktree(root.add_child("Checking out"), &interrupt)?;
    Ok(())
}

/// The only fetch refspec of a clone: the requested ref, or the remote's HEAD branch.
/// History of that ref is fetched in full.
fn single_branch_refspec(reference: Option<&str>) -> String {
    match reference {
        Some(name) if name.starts_with("refs/") => format!("+{name}:{name}"),
        Some(name) => format!("+{name}:refs/remotes/origin/{name}"),
        None => "+HEAD:refs/remotes/origin/HEAD".to_string(),
    }
}

/// Poll the progress tree and report the most recently updated task whose total is known.
fn forward_progress(root: &tree::Root, sink: &dyn ProgressSink, finished: &AtomicBool) {
    let mut snapshot = Vec::new();
    let mut last: Option<ProgressEvent> = None;

    while !finished.load(Ordering::Relaxed) {
        root.sorted_snapshot(&mut snapshot);

        let current = snapshot.iter().rev().find_map(|(_, task)| {
            let value = task.progress.as_ref()?;
            let total = value.done_at? as u64;
            let loaded = value.step.load(Ordering::Relaxed) as u64;
            (loaded > 0 && total > 0).then(|| ProgressEvent {
                phase: task.name.clone(),
                loaded,
                total,
            })
        });

        if let Some(event) = current {
            if last.as_ref() != Some(&event) {
                sink.on_progress(&event);
                last = Some(event);
            }
        }

        std::thread::sleep(POLL_INTERVAL);
    }

    sink.on_finish();
}
