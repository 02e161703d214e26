use crate::error::{Result, VizError};
use std::collections::HashSet;
use url::Url;

/// True when `identifier` should be cloned rather than opened from disk.
pub fn is_url(identifier: &str) -> bool {
    // Single-letter schemes are Windows drive letters, not URLs.
    Url::parse(identifier)
        .map(|url| url.scheme().len() > 1)
        .unwrap_or(false)
}

/// Best-effort `owner/repo` label for a hosted repository URL.
///
/// Anything that is not a URL with at least two path segments is returned as-is.
pub fn pretty_url(identifier: &str) -> String {
    let Ok(url) = Url::parse(identifier) else {
        return identifier.to_string();
    };
    if url.scheme().len() <= 1 {
        return identifier.to_string();
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [.., owner, repo] => {
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            format!("{owner}/{repo}")
        }
        _ => identifier.to_string(),
    }
}

pub fn parse_max_count(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(VizError::InvalidMaxCount(value.to_string())),
    }
}

pub fn ensure_unique(repos: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for repo in repos {
        if !seen.insert(repo.as_str()) {
            return Err(VizError::DuplicateRepository(repo.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_url_extracts_owner_and_repo() {
        let cases = [
            ("https://github.com/user/repo", "user/repo"),
            ("https://github.com/user/repo/", "user/repo"),
            ("https://github.com/user/repo.git", "user/repo"),
            ("git+https://github.com/user/repo.js", "user/repo.js"),
            ("git+https://github.com/user/repo.js.git/", "user/repo.js"),
            ("http://git.kernel.org/pub/test/user/repo.git/", "user/repo"),
            ("https://github.com/user/repo.git?foo=bar", "user/repo"),
        ];
        for (input, expected) in cases {
            assert_eq!(pretty_url(input), expected, "input: {input}");
        }
    }

    #[test]
    fn pretty_url_leaves_non_urls_alone() {
        assert_eq!(pretty_url("./some/local/repo"), "./some/local/repo");
        assert_eq!(pretty_url("https://example.com/"), "https://example.com/");
        assert_eq!(pretty_url("C:/work/repo"), "C:/work/repo");
    }

    #[test]
    fn url_detection() {
        assert!(is_url("https://github.com/octocat/Hello-World"));
        assert!(is_url("file:///tmp/repo"));
        assert!(!is_url("/tmp/repo"));
        assert!(!is_url("relative/path"));
        assert!(!is_url("C:\\repo"));
    }

    #[test]
    fn max_count_must_be_positive_integer() {
        assert_eq!(parse_max_count("10").unwrap(), 10);
        assert!(matches!(parse_max_count("0"), Err(VizError::InvalidMaxCount(_))));
        assert!(matches!(parse_max_count("ten"), Err(VizError::InvalidMaxCount(_))));
        assert!(matches!(parse_max_count("-3"), Err(VizError::InvalidMaxCount(_))));
    }

    #[test]
    fn duplicates_are_rejected() {
        let repos = vec!["a".to_string(), "b".to_string()];
        assert!(ensure_unique(&repos).is_ok());
        let repos = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert!(matches!(ensure_unique(&repos), Err(VizError::DuplicateRepository(r)) if r == "a"));
    }
}
