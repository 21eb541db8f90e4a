//! Utilities for the deploy scripts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::constants::HEX_PREFIX;

/// Prefix `value` with `0x` unless it already is, in either case
pub fn with_hex_prefix(value: &str) -> String {
    let has_prefix = value
        .get(..HEX_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(HEX_PREFIX));
    if has_prefix {
        value.to_string()
    } else {
        format!("{HEX_PREFIX}{value}")
    }
}

/// Every file named `file_name` below `dir`, in sorted path order.
///
/// Symlinks are not followed, so a link loop cannot trap the walk.
pub fn find_files(dir: &Path, file_name: &str) -> Vec<PathBuf> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut entries = read_dir.filter_map(Result::ok).collect::<Vec<_>>();
    // Stable lookup order across filesystems
    entries.sort_by_key(|entry| entry.path());

    let mut found = Vec::new();
    for entry in entries {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            found.extend(find_files(&path, file_name));
        } else if file_type.is_file() && entry.file_name() == file_name {
            found.push(path);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_prefix_is_added_once() {
        assert_eq!(with_hex_prefix("abc123"), "0xabc123");
        assert_eq!(with_hex_prefix("0xabc123"), "0xabc123");
        assert_eq!(with_hex_prefix("0XABC123"), "0XABC123");
        assert_eq!(with_hex_prefix(""), "0x");
    }

    #[test]
    fn finds_every_nested_match() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("contracts").join("DegenGame.sol");
        let test = dir.path().join("contracts").join("test").join("DegenGame.sol");
        for sub in [&main, &test] {
            fs::create_dir_all(sub).unwrap();
            fs::write(sub.join("DegenGame.json"), "{}").unwrap();
        }

        let found = find_files(dir.path(), "DegenGame.json");

        assert_eq!(found, vec![main.join("DegenGame.json"), test.join("DegenGame.json")]);
        assert!(find_files(dir.path(), "Other.json").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loops_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("contracts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("DegenGame.json"), "{}").unwrap();
        std::os::unix::fs::symlink(dir.path(), nested.join("loop")).unwrap();

        let found = find_files(dir.path(), "DegenGame.json");

        assert_eq!(found, vec![nested.join("DegenGame.json")]);
    }
}
