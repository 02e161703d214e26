use super::{Bar, ChartSpec, Marks, Series};
use crate::model::{AuthorCount, BucketCount, Interval};

pub fn author_commits_chart(rows: &[AuthorCount], repo: &str) -> ChartSpec {
    let bars = rows
        .iter()
        .map(|row| Bar {
            label: row.identity.label(),
            value: row.commits,
        })
        .collect();

    ChartSpec {
        title: format!("Commits per Author (top {})", rows.len()),
        subtitle: format!("Repository: {repo}"),
        x_label: Some("Commits".to_string()),
        y_label: None,
        marks: Marks::RankedBar(bars),
    }
}

pub fn author_activity_chart(rows: &[BucketCount], repo: &str, max: usize, interval: Interval) -> ChartSpec {
    ChartSpec {
        title: format!("Commits per Author Over Time (top {max})"),
        subtitle: format!("Repository: {repo}"),
        x_label: None,
        y_label: Some(format!("Commits per {interval}")),
        marks: Marks::LineOverTime {
            interval,
            series: group_series(rows),
        },
    }
}

pub fn commit_activity_chart(rows: &[BucketCount], repos: &[String], interval: Interval) -> ChartSpec {
    let heading = if repos.len() == 1 { "Repository" } else { "Repositories" };

    ChartSpec {
        title: "Commit Activity Chart".to_string(),
        subtitle: format!("{heading}: {}", repos.join(", ")),
        x_label: None,
        y_label: Some(format!("Commits per {interval}")),
        marks: Marks::LineOverTime {
            interval,
            series: group_series(rows),
        },
    }
}

/// One series per group, in order of first appearance.
fn group_series(rows: &[BucketCount]) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for row in rows {
        match series.iter_mut().find(|s| s.label == row.group) {
            Some(s) => s.points.push((row.bucket, row.commits)),
            None => series.push(Series {
                label: row.group.clone(),
                points: vec![(row.bucket, row.commits)],
            }),
        }
    }
    for s in &mut series {
        s.points.sort_by_key(|(bucket, _)| *bucket);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthorIdentity;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn author_commits_uses_ranked_bars() {
        let rows = vec![
            AuthorCount { identity: AuthorIdentity::new("Ann", "ann@x"), commits: 4 },
            AuthorCount { identity: AuthorIdentity::new("Bob", "bob@x"), commits: 2 },
        ];
        let spec = author_commits_chart(&rows, "user/repo");
        assert_eq!(spec.title, "Commits per Author (top 2)");
        assert_eq!(spec.subtitle, "Repository: user/repo");
        assert_eq!(
            spec.marks,
            Marks::RankedBar(vec![
                Bar { label: "Ann <ann@x>".into(), value: 4 },
                Bar { label: "Bob <bob@x>".into(), value: 2 },
            ])
        );
    }

    #[test]
    fn activity_groups_rows_into_series() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let rows = vec![
            BucketCount { bucket: feb, group: "a/one".into(), commits: 3 },
            BucketCount { bucket: jan, group: "b/two".into(), commits: 1 },
            BucketCount { bucket: jan, group: "a/one".into(), commits: 2 },
        ];
        let repos = vec!["a/one".to_string(), "b/two".to_string()];
        let spec = commit_activity_chart(&rows, &repos, Interval::Month);

        assert_eq!(spec.subtitle, "Repositories: a/one, b/two");
        assert_eq!(spec.y_label.as_deref(), Some("Commits per month"));
        let Marks::LineOverTime { series, .. } = spec.marks else {
            panic!("expected a line chart");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "a/one");
        assert_eq!(series[0].points, vec![(jan, 2), (feb, 3)]);
        assert_eq!(series[1].points, vec![(jan, 1)]);
    }

    #[test]
    fn single_repository_subtitle() {
        let spec = commit_activity_chart(&[], &["only".to_string()], Interval::Day);
        assert_eq!(spec.subtitle, "Repository: only");
    }

    #[test]
    fn author_activity_title_mentions_limit() {
        let spec = author_activity_chart(&[], "repo", 10, Interval::Year);
        assert_eq!(spec.title, "Commits per Author Over Time (top 10)");
        assert_eq!(spec.y_label.as_deref(), Some("Commits per year"));
    }
}
