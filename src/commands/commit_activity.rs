use super::fetch::fetch_logs;
use super::output::{confirm_overwrite, print_json, report_saved, report_skipped};
use crate::aggregate::by_interval_many;
use crate::chart::{commit_activity_chart, render};
use crate::cli::CommonArgs;
use crate::model::{ActivityOutput, CommitRecord, ImageFormat, Interval, SCHEMA_VERSION};
use crate::util::{ensure_unique, pretty_url};
use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

pub fn exec(
    common: CommonArgs,
    repos: Vec<String>,
    output: PathBuf,
    interval: Interval,
    json: bool,
) -> anyhow::Result<()> {
    let format = ImageFormat::from_output(&output)?;
    ensure_unique(&repos)?;
    // Series are keyed by label, so two spellings of one URL would merge.
    let labels: Vec<String> = repos.iter().map(|r| pretty_url(r)).collect();
    ensure_unique(&labels)?;
    if !json && !confirm_overwrite(&output, common.yes)? {
        report_skipped(&output);
        return Ok(());
    }

    let logs = fetch_logs(&repos, &common)?;
    let labelled: Vec<(String, Vec<CommitRecord>)> = labels.into_iter().zip(logs).collect();
    let rows = by_interval_many(&labelled, interval).context("Failed to bucket commits by interval")?;
    info!(repositories = repos.len(), rows = rows.len(), %interval, "aggregated commit activity");

    if json {
        return print_json(&ActivityOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repositories: repos,
            interval,
            rows,
        });
    }

    let spec = commit_activity_chart(&rows, &repos, interval);
    render(&spec, &output, format).context("Failed to render chart")?;
    report_saved("Chart", &output);
    Ok(())
}
