pub mod build;
pub mod render;

pub use build::{author_activity_chart, author_commits_chart, commit_activity_chart};
pub use render::render;

use crate::model::Interval;
use chrono::{DateTime, Utc};

/// A renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub subtitle: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub marks: Marks,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Marks {
    /// Bars drawn top to bottom, longest first.
    RankedBar(Vec<Bar>),
    LineOverTime { interval: Interval, series: Vec<Series> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(DateTime<Utc>, u64)>,
}
