use crate::git::would_overwrite;
use console::{style, Term};
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Ask before replacing `path`. Missing files and `--yes` need no confirmation;
/// without a terminal to ask on, the answer is no.
pub fn confirm_overwrite(path: &Path, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes || !would_overwrite(path) {
        return Ok(true);
    }

    let term = Term::stderr();
    if !term.is_term() {
        warn!(path = %path.display(), "output exists and no terminal to confirm; pass --yes to overwrite");
        return Ok(false);
    }

    term.write_str(&format!(
        "{} Would you like to overwrite {}? [y/N] ",
        style("?").yellow().bold(),
        path.display()
    ))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn report_skipped(path: &Path) {
    println!("{} '{}' left unchanged", style("Skipped:").yellow(), path.display());
}

pub fn report_written(what: &str, path: &Path) {
    println!("{what} written to {}", style(path.display()).cyan());
}

pub fn report_saved(what: &str, path: &Path) {
    println!("{what} saved to '{}'", style(path.display()).cyan());
}
