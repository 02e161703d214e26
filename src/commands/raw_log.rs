use super::fetch::fetch_one;
use super::output::{confirm_overwrite, report_skipped, report_written};
use crate::cli::CommonArgs;
use crate::model::{ensure_json_output, RawLogOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;

pub fn exec(common: CommonArgs, repo: String, output: PathBuf, pretty: bool) -> anyhow::Result<()> {
    ensure_json_output(&output)?;
    if !confirm_overwrite(&output, common.yes)? {
        report_skipped(&output);
        return Ok(());
    }

    let commits = fetch_one(&repo, &common)?;
    let document = RawLogOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repo,
        commits,
    };

    // Serialize fully before touching the output file.
    let bytes = if pretty {
        serde_json::to_vec_pretty(&document)?
    } else {
        serde_json::to_vec(&document)?
    };
    std::fs::write(&output, bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    report_written("Raw log", &output);
    Ok(())
}
