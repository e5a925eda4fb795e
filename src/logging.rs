//! Log file setup.
//!
//! The JSON log file is opt-in through `LOG_FILE_PATH`; without it the tool
//! leaves nothing behind but its report.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Environment variable naming the JSON log file.
pub const LOG_FILE_ENV_VAR: &str = "LOG_FILE_PATH";

/// Builds a daily rolling appender for `log_file_path`.
///
/// # Errors
///
/// Fails if the log directory cannot be created or the file cannot be opened.
pub fn rolling_appender(log_file_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("cabstats.log"));

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name.to_string_lossy())
        .build(log_dir)
        .with_context(|| format!("failed to open log file {}", log_file_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_rolling_appender_creates_directory() {
        let dir = env::temp_dir().join("cabstats_test_log_dir");
        let _ = fs::remove_dir_all(&dir);

        let appender = rolling_appender(&dir.join("run.log"));
        assert!(appender.is_ok());
        assert!(dir.is_dir());

        drop(appender);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rolling_appender_directory_is_a_file() {
        let blocker = env::temp_dir().join("cabstats_test_log_blocker");
        let _ = fs::remove_dir_all(&blocker);
        fs::write(&blocker, "not a directory").unwrap();

        let err = rolling_appender(&blocker.join("run.log")).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));

        fs::remove_file(&blocker).unwrap();
    }
}
