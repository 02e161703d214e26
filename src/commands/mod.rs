pub mod author_activity;
pub mod author_commits;
pub mod commit_activity;
pub mod fetch;
pub mod output;
pub mod raw_log;
