//! Shared test fixtures: request trees in temp directories.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a request file (creating parents) and return its canonical path.
pub fn request_file(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("relative path has a parent"))
        .expect("Failed to create request directory");
    fs::write(&path, "GET https://example.com/health\n").expect("Failed to write request file");
    fs::canonicalize(&path).expect("Failed to canonicalize request file")
}

/// Temp directory with `a.http` at the top and `dir/` holding `b.http` and `c.rest`.
pub fn request_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    request_file(temp_dir.path(), "a.http");
    request_file(temp_dir.path(), "dir/b.http");
    request_file(temp_dir.path(), "dir/c.rest");
    fs::write(temp_dir.path().join("dir/readme.md"), "not a request")
        .expect("Failed to write readme");
    temp_dir
}

pub fn strings(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

pub fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}
