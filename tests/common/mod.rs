#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub const GIT_USERNAME: &str = "Test User";
pub const GIT_EMAIL: &str = "test@example.com";

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn create_branch(dir: &Path, name: &str) {
    git(dir, &["branch", name]);
}

/// Full names of every ref in the repository at `dir`.
pub fn ref_names(dir: &Path) -> Vec<String> {
    let out = Command::new("git")
        .args(["for-each-ref", "--format=%(refname)"])
        .current_dir(dir)
        .output()
        .unwrap();
    String::from_utf8_lossy(&out.stdout).lines().map(str::to_string).collect()
}

pub fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", GIT_EMAIL]);
    git(dir, &["config", "user.name", GIT_USERNAME]);
}

/// Commit `content` to `name` as the given author at `date` (RFC 2822 or ISO 8601).
pub fn commit_as(dir: &Path, author: (&str, &str), date: &str, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();

    git(dir, &["add", "."]);
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("add {name}")])
        .env("GIT_AUTHOR_NAME", author.0)
        .env("GIT_AUTHOR_EMAIL", author.1)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_NAME", author.0)
        .env("GIT_COMMITTER_EMAIL", author.1)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn commit_file(dir: &Path, name: &str, content: &str) {
    commit_as(dir, (GIT_USERNAME, GIT_EMAIL), "2024-03-15T10:00:00Z", name, content);
}

/// Message of the commit created first by [`commit_file`] for `README.md`.
pub const INITIAL_MESSAGE: &str = "add README.md\n";
