use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Error, Debug)]
pub enum VizError {
    #[error("Output file must be one of: {}", .allowed.join(", "))]
    InvalidOutputFormat { allowed: Vec<String> },
    #[error("Interval must be one of: {} (got \"{value}\")", quoted(.allowed))]
    InvalidInterval { value: String, allowed: Vec<String> },
    #[error("Maximum count must be a positive integer (got \"{0}\")")]
    InvalidMaxCount(String),
    #[error("Duplicate repositories found in the input: {0}")]
    DuplicateRepository(String),
    #[error("Directory {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Directory {} is not a Git repository", .0.display())]
    NotAGitRepository(PathBuf),
    #[error("Git error: {0}")]
    Git(String),
    #[error("Git open error: {0}")]
    Open(#[from] Box<gix::open::Error>),
    #[error("Clone error: {0}")]
    Clone(#[from] Box<gix::clone::Error>),
    #[error("Fetch error: {0}")]
    Fetch(#[from] Box<gix::clone::fetch::Error>),
    #[error("Checkout error: {0}")]
    Checkout(#[from] Box<gix::clone::checkout::main_worktree::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for VizError {
    fn from(err: gix::open::Error) -> Self {
        VizError::Open(Box::new(err))
    }
}

impl From<gix::clone::Error> for VizError {
    fn from(err: gix::clone::Error) -> Self {
        VizError::Clone(Box::new(err))
    }
}

impl From<gix::clone::fetch::Error> for VizError {
    fn from(err: gix::clone::fetch::Error) -> Self {
        VizError::Fetch(Box::new(err))
    }
}

impl From<gix::clone::checkout::main_worktree::Error> for VizError {
    fn from(err: gix::clone::checkout::main_worktree::Error) -> Self {
        VizError::Checkout(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for VizError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        VizError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for VizError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        VizError::RefFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for VizError {
    fn from(err: gix::object::commit::Error) -> Self {
        VizError::Commit(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for VizError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        VizError::HeadPeel(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for VizError {
    fn from(err: gix::objs::decode::Error) -> Self {
        VizError::ObjectDecode(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_output_format_lists_allowed_extensions() {
        let err = VizError::InvalidOutputFormat {
            allowed: vec![".png".into(), ".jpeg".into(), ".webp".into()],
        };
        assert_eq!(err.to_string(), "Output file must be one of: .png, .jpeg, .webp");
    }

    #[test]
    fn invalid_interval_quotes_allowed_values() {
        let err = VizError::InvalidInterval {
            value: "week".into(),
            allowed: vec!["day".into(), "month".into(), "year".into()],
        };
        assert_eq!(
            err.to_string(),
            "Interval must be one of: \"day\", \"month\", \"year\" (got \"week\")"
        );
    }
}
