use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, VizError};

pub const SCHEMA_VERSION: u32 = 1;

/// A single commit as read from the history of the checked-out branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    /// Author time in Unix seconds, as recorded by Git.
    pub author_timestamp: i64,
    pub message: String,
    pub parent_ids: Vec<String>,
}

/// Granularity used to bucket commits on a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Day,
    Month,
    Year,
}

impl Interval {
    pub const ALLOWED: [&'static str; 3] = ["day", "month", "year"];

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Month => "month",
            Interval::Year => "year",
        }
    }

    /// Floor a Unix timestamp to the start of its containing day, month or year in UTC.
    pub fn truncate(self, timestamp: i64) -> Result<DateTime<Utc>> {
        let dt = DateTime::<Utc>::from_timestamp(timestamp, 0)
            .ok_or_else(|| VizError::InvalidDate(format!("Invalid timestamp: {timestamp}")))?;

        let (month, day) = match self {
            Interval::Day => (dt.month(), dt.day()),
            Interval::Month => (dt.month(), 1),
            Interval::Year => (1, 1),
        };

        Utc.with_ymd_and_hms(dt.year(), month, day, 0, 0, 0)
            .single()
            .ok_or_else(|| VizError::InvalidDate(format!("Cannot truncate timestamp: {timestamp}")))
    }

    /// strftime pattern used for axis labels at this granularity.
    pub fn label_format(self) -> &'static str {
        match self {
            Interval::Day => "%Y-%m-%d",
            Interval::Month => "%Y-%m",
            Interval::Year => "%Y",
        }
    }
}

impl FromStr for Interval {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Interval::Day),
            "month" => Ok(Interval::Month),
            "year" => Ok(Interval::Year),
            other => Err(VizError::InvalidInterval {
                value: other.to_string(),
                allowed: Self::ALLOWED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp];

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Webp => "webp",
        }
    }

    /// Determine the image format from the output file's extension.
    pub fn from_output(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        Self::ALL
            .into_iter()
            .find(|fmt| name.ends_with(&format!(".{}", fmt.extension())))
            .ok_or_else(|| VizError::InvalidOutputFormat {
                allowed: Self::ALL.iter().map(|f| format!(".{}", f.extension())).collect(),
            })
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

/// Raw logs are only ever written as JSON.
pub fn ensure_json_output(path: &Path) -> Result<()> {
    if path.to_string_lossy().ends_with(".json") {
        Ok(())
    } else {
        Err(VizError::InvalidOutputFormat {
            allowed: vec![".json".to_string()],
        })
    }
}

/// Aggregation key for per-author counts.
///
/// A strict identity always holds exactly one name and one email. A merged
/// identity accumulates every name and email seen together, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIdentity {
    pub names: Vec<String>,
    pub emails: Vec<String>,
}

impl AuthorIdentity {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            names: vec![name.to_string()],
            emails: vec![email.to_string()],
        }
    }

    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.emails.first().map(String::as_str).unwrap_or("")
    }

    pub fn absorb(&mut self, name: &str, email: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
        if !self.emails.iter().any(|e| e == email) {
            self.emails.push(email.to_string());
        }
    }

    pub fn label(&self) -> String {
        format!("{} <{}>", self.name(), self.email())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub identity: AuthorIdentity,
    pub commits: u64,
}

/// Commit count for one group (author or repository) within one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub bucket: DateTime<Utc>,
    pub group: String,
    pub commits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorCommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub max: usize,
    pub authors: Vec<AuthorCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repositories: Vec<String>,
    pub interval: Interval,
    pub rows: Vec<BucketCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLogOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub commits: Vec<CommitRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 2024-03-15T10:00:00Z
    const MID_MARCH: i64 = 1_710_496_800;

    #[test]
    fn truncate_day_month_year() {
        assert_eq!(
            Interval::Day.truncate(MID_MARCH).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(
            Interval::Month.truncate(MID_MARCH).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            Interval::Year.truncate(MID_MARCH).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn truncate_is_utc_based() {
        // 2024-03-31T23:30:00Z stays in March regardless of local offsets
        let late = 1_711_927_800;
        assert_eq!(
            Interval::Month.truncate(late).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn interval_parsing_rejects_unknown_values() {
        assert_eq!("month".parse::<Interval>().unwrap(), Interval::Month);
        let err = "week".parse::<Interval>().unwrap_err();
        assert!(err.to_string().contains("\"day\", \"month\", \"year\""));
    }

    #[test]
    fn image_format_follows_extension() {
        assert_eq!(ImageFormat::from_output(Path::new("out.png")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_output(Path::new("a/b.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_output(Path::new("c.webp")).unwrap(), ImageFormat::Webp);

        let err = ImageFormat::from_output(Path::new("chart.svg")).unwrap_err();
        assert_eq!(err.to_string(), "Output file must be one of: .png, .jpeg, .webp");
    }

    #[test]
    fn raw_log_requires_json() {
        assert!(ensure_json_output(Path::new("log.json")).is_ok());
        assert!(matches!(
            ensure_json_output(Path::new("log.txt")),
            Err(VizError::InvalidOutputFormat { .. })
        ));
    }

    #[test]
    fn identity_absorb_keeps_first_seen_order() {
        let mut id = AuthorIdentity::new("A", "a@x");
        id.absorb("B", "a@x");
        id.absorb("A", "b@x");
        assert_eq!(id.names, vec!["A", "B"]);
        assert_eq!(id.emails, vec!["a@x", "b@x"]);
        assert_eq!(id.label(), "A <a@x>");
    }
}
