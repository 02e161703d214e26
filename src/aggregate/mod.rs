pub mod activity;
pub mod author;
pub mod identity;

pub use activity::{by_interval, by_interval_many};
pub use author::{by_author, by_author_over_time};
pub use identity::merge_identities;

/// How commits are attributed to authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    /// Same author only when both name and email match exactly.
    #[default]
    StrictPair,
    /// Authors sharing a name or an email are the same person, transitively.
    MergedSet,
}

impl IdentityPolicy {
    pub fn from_flag(merge_identities: bool) -> Self {
        if merge_identities {
            IdentityPolicy::MergedSet
        } else {
            IdentityPolicy::StrictPair
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::model::CommitRecord;

    pub fn commit(name: &str, email: &str, timestamp: i64) -> CommitRecord {
        CommitRecord {
            id: format!("{name}-{email}-{timestamp}"),
            author_name: name.to_string(),
            author_email: email.to_string(),
            author_timestamp: timestamp,
            message: "change\n".to_string(),
            parent_ids: Vec::new(),
        }
    }

    pub fn repeat(name: &str, n: usize) -> Vec<CommitRecord> {
        (0..n)
            .map(|i| commit(name, &format!("{name}@example.com"), i as i64))
            .collect()
    }
}
