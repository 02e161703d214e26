use super::fetch::fetch_one;
use super::output::{confirm_overwrite, print_json, report_saved, report_skipped};
use crate::aggregate::{by_author, IdentityPolicy};
use crate::chart::{author_commits_chart, render};
use crate::cli::CommonArgs;
use crate::model::{AuthorCommitsOutput, ImageFormat, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

pub fn exec(
    common: CommonArgs,
    repo: String,
    output: PathBuf,
    max: usize,
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
    let authors = by_author(&log, policy, max);
    info!(commits = log.len(), authors = authors.len(), ?policy, "aggregated commits per author");

    if json {
        return print_json(&AuthorCommitsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repository: repo,
            max,
            authors,
        });
    }

    let spec = author_commits_chart(&authors, &repo);
    render(&spec, &output, format).context("Failed to render chart")?;
    report_saved("Chart", &output);
    Ok(())
}
