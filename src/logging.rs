use crate::config::LogConfig;
use log::LevelFilter;
use std::path::PathBuf;
use thiserror::Error;

/// Default location of the log file
pub(crate) fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
}

/// Install a logger writing to the configured log file, truncating any log
/// from a previous run.  The terminal belongs to the game's interface, so
/// nothing is ever logged to it.
///
/// Returns the path of the log file, or `None` if logging is turned off.
pub(crate) fn init(cfg: &LogConfig) -> Result<Option<PathBuf>, LogError> {
    if cfg.level == LevelFilter::Off {
        return Ok(None);
    }
    let path = cfg
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or(LogError(LogErrorSource::NoPath))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LogError::create)?;
    }
    let file = fs_err::File::create(&path).map_err(LogError::create)?;
    simplelog::WriteLogger::init(cfg.level, simplelog::Config::default(), file)
        .map_err(|e| LogError(LogErrorSource::Install(e)))?;
    Ok(Some(path))
}

#[derive(Debug, Error)]
#[error("Failed to set up logging")]
pub(crate) struct LogError(#[source] LogErrorSource);

impl LogError {
    fn create(e: std::io::Error) -> Self {
        LogError(LogErrorSource::Create(e))
    }
}

#[derive(Debug, Error)]
enum LogErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create log file")]
    Create(#[source] std::io::Error),
    #[error("a logger was already installed")]
    Install(#[source] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_does_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs").join("gridsnake.log");
        let cfg = LogConfig {
            file: Some(path.clone()),
            level: LevelFilter::Off,
        };
        assert_eq!(init(&cfg).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn default_path_in_data_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("gridsnake/gridsnake.log"));
        }
    }
}
