//! Single-purpose token converters

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const TRUE_WORDS: [&str; 5] = ["y", "yes", "t", "true", "1"];
const FALSE_WORDS: [&str; 5] = ["n", "no", "f", "false", "0"];

/// Parse a boolean from a yes/no word, case-insensitively
pub fn boolean(token: &str) -> Result<bool, String> {
    let lowered = token.trim().to_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        return Ok(true);
    }
    if FALSE_WORDS.contains(&lowered.as_str()) {
        return Ok(false);
    }
    Err(format!("'{}' is not a boolean", token))
}

/// Normalization applied to path tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOptions {
    /// Fail when the path does not exist (unless `mkdir` creates it)
    #[serde(default)]
    pub ensure: bool,
    /// Create a missing directory when `ensure` is set
    #[serde(default)]
    pub mkdir: bool,
    /// Expand a leading `~`
    #[serde(default)]
    pub expanduser: bool,
    /// Resolve against the current directory
    #[serde(default)]
    pub absolute: bool,
}

/// Convert a token into a path according to `options`
pub fn normalize_path(token: &str, options: &PathOptions) -> Result<PathBuf, String> {
    let mut path = if options.expanduser {
        PathBuf::from(shellexpand::tilde(token).into_owned())
    } else {
        PathBuf::from(token)
    };

    if options.ensure && !path.exists() {
        if !options.mkdir {
            return Err(format!("'{}' does not exist", token));
        }
        std::fs::create_dir_all(&path)
            .map_err(|e| format!("failed to create '{}': {}", path.display(), e))?;
    }

    if options.absolute && path.is_relative() {
        let cwd = std::env::current_dir()
            .map_err(|e| format!("failed to read current directory: {}", e))?;
        path = cwd.join(path);
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_boolean_word_sets() {
        for word in ["y", "YES", "t", "True", "1"] {
            assert_eq!(boolean(word), Ok(true), "{}", word);
        }
        for word in ["n", "No", "F", "false", "0"] {
            assert_eq!(boolean(word), Ok(false), "{}", word);
        }
        assert!(boolean("maybe").is_err());
        assert!(boolean("").is_err());
    }

    #[test]
    fn test_path_passthrough() {
        let path = normalize_path("some/dir", &PathOptions::default()).unwrap();
        assert_eq!(path, PathBuf::from("some/dir"));
    }

    #[test]
    fn test_path_ensure_missing_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let options = PathOptions {
            ensure: true,
            ..Default::default()
        };
        assert!(normalize_path(missing.to_str().unwrap(), &options).is_err());
    }

    #[test]
    fn test_path_ensure_with_mkdir_creates() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b");
        let options = PathOptions {
            ensure: true,
            mkdir: true,
            ..Default::default()
        };
        let path = normalize_path(target.to_str().unwrap(), &options).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_path_absolute() {
        let options = PathOptions {
            absolute: true,
            ..Default::default()
        };
        let path = normalize_path("relative", &options).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("relative"));
    }
}
