use super::identity::merge_identities;
use super::IdentityPolicy;
use crate::error::Result;
use crate::model::{AuthorCount, AuthorIdentity, BucketCount, CommitRecord, Interval};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Commits per author, highest count first, keeping at most `max` authors.
///
/// Authors with equal counts keep the order in which they were first seen.
pub fn by_author(records: &[CommitRecord], policy: IdentityPolicy, max: usize) -> Vec<AuthorCount> {
    let mut rows = match policy {
        IdentityPolicy::StrictPair => count_strict(records),
        IdentityPolicy::MergedSet => count_merged(records),
    };

    rows.sort_by(|a, b| b.commits.cmp(&a.commits));
    rows.truncate(max);
    rows
}

fn count_strict(records: &[CommitRecord]) -> Vec<AuthorCount> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut rows: Vec<AuthorCount> = Vec::new();

    for record in records {
        let key = (record.author_name.as_str(), record.author_email.as_str());
        match index.get(&key) {
            Some(&i) => rows[i].commits += 1,
            None => {
                index.insert(key, rows.len());
                rows.push(AuthorCount {
                    identity: AuthorIdentity::new(&record.author_name, &record.author_email),
                    commits: 1,
                });
            }
        }
    }
    rows
}

fn count_merged(records: &[CommitRecord]) -> Vec<AuthorCount> {
    let groups = merge_identities(records);
    let mut counts = vec![0u64; groups.identities.len()];
    for &group in &groups.membership {
        counts[group] += 1;
    }

    groups
        .identities
        .into_iter()
        .zip(counts)
        .map(|(identity, commits)| AuthorCount { identity, commits })
        .collect()
}

/// Commits per author per time bucket, restricted to the `max` most active authors.
///
/// Under the strict policy the series label is the raw author name; under the
/// merged policy it is the display name of the merged identity. Rows come out
/// grouped by author in rank order, each author's buckets ascending.
pub fn by_author_over_time(
    records: &[CommitRecord],
    policy: IdentityPolicy,
    interval: Interval,
    max: usize,
) -> Result<Vec<BucketCount>> {
    let labels: Vec<String> = match policy {
        IdentityPolicy::StrictPair => records.iter().map(|r| r.author_name.clone()).collect(),
        IdentityPolicy::MergedSet => {
            let groups = merge_identities(records);
            groups
                .membership
                .iter()
                .map(|&g| groups.identities[g].name().to_string())
                .collect()
        }
    };

    let mut index: HashMap<(DateTime<Utc>, &str), usize> = HashMap::new();
    let mut rows: Vec<BucketCount> = Vec::new();
    let mut totals: Vec<(&str, u64)> = Vec::new();
    let mut total_index: HashMap<&str, usize> = HashMap::new();

    for (record, label) in records.iter().zip(&labels) {
        let bucket = interval.truncate(record.author_timestamp)?;
        match index.get(&(bucket, label.as_str())) {
            Some(&i) => rows[i].commits += 1,
            None => {
                index.insert((bucket, label.as_str()), rows.len());
                rows.push(BucketCount {
                    bucket,
                    group: label.clone(),
                    commits: 1,
                });
            }
        }

        let slot = *total_index.entry(label.as_str()).or_insert_with(|| {
            totals.push((label.as_str(), 0));
            totals.len() - 1
        });
        totals[slot].1 += 1;
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    let rank: HashMap<&str, usize> = totals
        .iter()
        .take(max)
        .enumerate()
        .map(|(i, (name, _))| (*name, i))
        .collect();
    let kept: HashSet<&str> = rank.keys().copied().collect();

    let mut rows: Vec<BucketCount> = rows
        .into_iter()
        .filter(|row| kept.contains(row.group.as_str()))
        .collect();
    rows.sort_by(|a, b| {
        rank[a.group.as_str()]
            .cmp(&rank[b.group.as_str()])
            .then(a.bucket.cmp(&b.bucket))
    });
    Ok(rows)
}
