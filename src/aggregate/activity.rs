use crate::error::Result;
use crate::model::{BucketCount, CommitRecord, Interval};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Commits per time bucket for one repository, ascending by bucket.
pub fn by_interval(label: &str, records: &[CommitRecord], interval: Interval) -> Result<Vec<BucketCount>> {
    let mut index: HashMap<DateTime<Utc>, usize> = HashMap::new();
    let mut rows: Vec<BucketCount> = Vec::new();

    for record in records {
        let bucket = interval.truncate(record.author_timestamp)?;
        match index.get(&bucket) {
            Some(&i) => rows[i].commits += 1,
            None => {
                index.insert(bucket, rows.len());
                rows.push(BucketCount {
                    bucket,
                    group: label.to_string(),
                    commits: 1,
                });
            }
        }
    }

    rows.sort_by(|a, b| a.bucket.cmp(&b.bucket));
    Ok(rows)
}

/// Aggregate several repositories and flatten them into one row set, in input order.
pub fn by_interval_many(
    repos: &[(String, Vec<CommitRecord>)],
    interval: Interval,
) -> Result<Vec<BucketCount>> {
    let mut rows = Vec::new();
    for (label, records) in repos {
        rows.extend(by_interval(label, records, interval)?);
    }
    Ok(rows)
}
