use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// One clone progress update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: String,
    pub loaded: u64,
    pub total: u64,
}

/// Receives clone progress. Implementations must tolerate updates coming
/// from several repositories' worker threads at once.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);

    fn on_finish(&self) {}
}

impl ProgressSink for ProgressBar {
    fn on_progress(&self, event: &ProgressEvent) {
        self.set_length(event.total);
        self.set_position(event.loaded.min(event.total));
        self.set_message(event.phase.clone());
    }

    fn on_finish(&self) {
        self.finish_and_clear();
    }
}

/// Per-call settings for resolving a repository identifier.
#[derive(Default, Clone, Copy)]
pub struct ResolveOptions<'a> {
    /// Branch or tag to check out when cloning.
    pub reference: Option<&'a str>,
    pub progress: Option<&'a dyn ProgressSink>,
}

/// Terminal progress display shared by every repository of one command.
pub struct ProgressBoard {
    multi: Option<MultiProgress>,
}

impl ProgressBoard {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: enabled.then(MultiProgress::new),
        }
    }

    /// A bar for `repo`, or `None` when progress output is disabled.
    pub fn bar(&self, repo: &str) -> Option<ProgressBar> {
        let multi = self.multi.as_ref()?;
        let pb = multi.add(ProgressBar::new(100));
        pb.set_style(
            ProgressStyle::default_bar()
                .template(" {msg} | {bar:40} | {prefix} | {percent}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█░ "),
        );
        pb.set_prefix(repo.to_string());
        pb.set_message("Cloning");
        Some(pb)
    }

    pub fn clear(&self) {
        if let Some(multi) = &self.multi {
            let _ = multi.clear();
        }
    }
}
