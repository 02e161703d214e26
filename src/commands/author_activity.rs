use super::fetch::fetch_one;
use super::output::{confirm_overwrite, print_json, report_saved, report_skipped};
use crate::aggregate::{by_author_over_time, IdentityPolicy};
use crate::chart::{author_activity_chart, render};
use crate::cli::CommonArgs;
use crate::model::{ActivityOutput, ImageFormat, Interval, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

pub fn exec(
    common: CommonArgs,
    repo: String,
    output: PathBuf,
    max: usize,
    interval: Interval,
    merge_identities: bool,
    json: bool,
) -> anyhow::Result<()> {
    let format = ImageFormat::from_output(&output)?;
    if !json && !confirm_overwrite(&output, common.yes)? {
        report_skipped(&output);
        return Ok(());
    }

    let log = fetch_one(&repo, &common)?;
    let policy = IdentityPolicy::from_flag(merge_identities);
    let rows = by_author_over_time(&log, policy, interval, max)
        .context("Failed to bucket commits by author")?;
    info!(commits = log.len(), rows = rows.len(), %interval, "aggregated author activity");

    if json {
        return print_json(&ActivityOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repositories: vec![repo],
            interval,
            rows,
        });
    }

    let spec = author_activity_chart(&rows, &repo, max, interval);
    render(&spec, &output, format).context("Failed to render chart")?;
    report_saved("Chart", &output);
    Ok(())
}
