//! Runtime settings shared by the CLI subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Trip data file looked up in the working directory when no path is given.
pub const DEFAULT_FILE_NAME: &str = "yellow_tripdata_2020-04.csv";

/// Environment variable overriding the default input path.
pub const FILE_ENV_VAR: &str = "CABSTATS_FILE";

/// Number of journeys kept per vendor.
pub const DEFAULT_TOP_N: usize = 50;

/// Picks the input path: explicit flag, then environment, then the default
/// file name inside `cwd`.
pub fn resolve_input_path(flag: Option<PathBuf>, env: Option<String>, cwd: &Path) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| cwd.join(DEFAULT_FILE_NAME))
}

/// [`resolve_input_path`] against the real process environment.
pub fn input_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(resolve_input_path(
        flag,
        std::env::var(FILE_ENV_VAR).ok(),
        &cwd,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let path = resolve_input_path(
            Some(PathBuf::from("april.csv")),
            Some("may.csv".to_string()),
            Path::new("/data"),
        );
        assert_eq!(path, PathBuf::from("april.csv"));
    }

    #[test]
    fn test_env_before_default() {
        let path = resolve_input_path(None, Some("may.csv".to_string()), Path::new("/data"));
        assert_eq!(path, PathBuf::from("may.csv"));
    }

    #[test]
    fn test_default_in_cwd() {
        let path = resolve_input_path(None, None, Path::new("/data"));
        assert_eq!(path, PathBuf::from("/data/yellow_tripdata_2020-04.csv"));

        let blank_env = resolve_input_path(None, Some(String::new()), Path::new("/data"));
        assert_eq!(blank_env, path);
    }
}
