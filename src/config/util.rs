//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/icons/logo/   ← cwd
/// /home/user/svgpng.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
pub fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("svgpng.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("svgpng.toml")).unwrap();
        assert_eq!(found, dir.path().join("svgpng.toml"));
    }

    #[test]
    fn test_nearest_config_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("svgpng.toml"), "").unwrap();
        fs::write(nested.join("svgpng.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("svgpng.toml")).unwrap();
        assert_eq!(found, nested.join("svgpng.toml"));
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_from(dir.path(), &path), None);

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_from(Path::new("/"), &path), Some(path));
    }

    #[test]
    fn test_directory_is_not_config() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("svgpng.toml")).unwrap();
        let nested = dir.path().join("x");
        fs::create_dir(&nested).unwrap();

        // A directory named like the config file is skipped
        let found = find_config_from(&nested, Path::new("svgpng.toml"));
        assert!(found.is_none_or(|p| !p.starts_with(dir.path())));
    }
}
