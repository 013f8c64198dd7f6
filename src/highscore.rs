use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// The on-disk slot holding the best score ever achieved.
///
/// The file is a JSON object used as a small key-value store; the high score
/// lives under the `"snakeHighScore"` key, and any other keys found in the
/// file are carried over untouched when the score is written back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreFile {
    path: Option<PathBuf>,
}

impl ScoreFile {
    /// Create a `ScoreFile` for the given path.  A `None` path means that no
    /// location could be determined, and every load or save will fail.
    pub(crate) fn new(path: Option<PathBuf>) -> ScoreFile {
        ScoreFile { path }
    }

    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("scores.json"))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the stored high score.  A missing file or a file without the high
    /// score key counts as a high score of zero.
    pub(crate) fn load(&self) -> Result<u32, LoadError> {
        let path = self.path().ok_or_else(LoadError::no_path)?;
        Ok(read_store(path)
            .map_err(LoadError::read)?
            .map(|store| serde_json::from_slice::<Store>(&store))
            .transpose()
            .map_err(LoadError::deserialize)?
            .and_then(|store| store.high_score)
            .unwrap_or_default())
    }

    /// Write `score` to disk as the high score, preserving any other entries
    /// already in the file.
    pub(crate) fn save(&self, score: u32) -> Result<(), SaveError> {
        let path = self.path().ok_or_else(SaveError::no_path)?;
        let mut store = match read_store(path).map_err(SaveError::read)? {
            Some(src) => {
                match serde_json::from_slice::<BTreeMap<String, serde_json::Value>>(&src) {
                    Ok(map) => Store::from_map(map),
                    Err(e) => {
                        log::warn!(
                            "Scores file {} is not a JSON object ({e}); overwriting it",
                            path.display()
                        );
                        Store::default()
                    }
                }
            }
            None => Store::default(),
        };
        store.high_score = Some(score);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&store).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// Read the raw file contents, or `None` if there is no file yet
fn read_store(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match fs_err::read(path) {
        Ok(src) => Ok(Some(src)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
struct Store {
    #[serde(
        rename = "snakeHighScore",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    high_score: Option<u32>,

    #[serde(flatten)]
    other: BTreeMap<String, serde_json::Value>,
}

impl Store {
    /// Build a store from an arbitrary JSON object.  A high score entry that
    /// isn't a valid score is dropped; everything else is kept.
    fn from_map(mut other: BTreeMap<String, serde_json::Value>) -> Store {
        let high_score = other
            .remove(HIGH_SCORE_KEY)
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok());
        Store { high_score, other }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Read(e))
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read existing scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write scores file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize scores file")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn stored_under_fixed_key() {
        let store = Store {
            high_score: Some(1),
            other: BTreeMap::new(),
        };
        assert_eq!(
            serde_json::to_value(&store).unwrap(),
            json!({"snakeHighScore": 1})
        );
    }

    #[test]
    fn missing_file_is_zero() {
        let tmp = tempdir().unwrap();
        let scores = ScoreFile::new(Some(tmp.path().join("scores.json")));
        assert_eq!(scores.load().unwrap(), 0);
    }

    #[test]
    fn missing_key_is_zero() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("scores.json");
        fs_err::write(&path, "{\"theme\": \"dark\"}\n").unwrap();
        assert_eq!(ScoreFile::new(Some(path)).load().unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("dir").join("scores.json");
        let scores = ScoreFile::new(Some(path.clone()));
        scores.save(120).unwrap();
        assert!(path.exists());
        assert_eq!(scores.load().unwrap(), 120);
        scores.save(250).unwrap();
        assert_eq!(scores.load().unwrap(), 250);
    }

    #[test]
    fn save_preserves_other_keys() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("scores.json");
        fs_err::write(
            &path,
            "{\"snakeHighScore\": 40, \"theme\": \"dark\", \"volume\": [1, 2]}",
        )
        .unwrap();
        let scores = ScoreFile::new(Some(path.clone()));
        assert_eq!(scores.load().unwrap(), 40);
        scores.save(90).unwrap();
        let value = serde_json::from_str::<serde_json::Value>(
            &fs_err::read_to_string(&path).unwrap(),
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"snakeHighScore": 90, "theme": "dark", "volume": [1, 2]})
        );
    }

    #[rstest]
    #[case("\"120\"")]
    #[case("-5")]
    #[case("4294967296")]
    #[case("[1, 2]")]
    fn save_replaces_bad_score_keeping_other_keys(#[case] bad: &str) {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("scores.json");
        let src = format!("{{\"snakeHighScore\": {bad}, \"theme\": \"dark\"}}");
        fs_err::write(&path, src).unwrap();
        let scores = ScoreFile::new(Some(path.clone()));
        assert!(scores.load().is_err());
        scores.save(30).unwrap();
        let value = serde_json::from_str::<serde_json::Value>(
            &fs_err::read_to_string(&path).unwrap(),
        )
        .unwrap();
        assert_eq!(value, json!({"snakeHighScore": 30, "theme": "dark"}));
        assert_eq!(scores.load().unwrap(), 30);
    }

    #[test]
    fn save_overwrites_non_object() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("scores.json");
        fs_err::write(&path, "[1, 2, 3]").unwrap();
        let scores = ScoreFile::new(Some(path));
        scores.save(10).unwrap();
        assert_eq!(scores.load().unwrap(), 10);
    }

    #[test]
    fn save_overwrites_garbage() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("scores.json");
        fs_err::write(&path, "not json").unwrap();
        let scores = ScoreFile::new(Some(path));
        assert!(scores.load().is_err());
        scores.save(10).unwrap();
        assert_eq!(scores.load().unwrap(), 10);
    }

    #[test]
    fn no_path() {
        let scores = ScoreFile::new(None);
        let e = scores.load().unwrap_err();
        assert_eq!(
            crate::warning::error_chain(&e),
            [
                "Failed to read high score from disk",
                "failed to determine path to local data directory"
            ]
        );
        assert!(scores.save(10).is_err());
    }

    #[test]
    fn save_into_file_parent_fails() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs_err::write(&blocker, "").unwrap();
        let scores = ScoreFile::new(Some(blocker.join("scores.json")));
        let e = scores.save(10).unwrap_err();
        assert_eq!(e.to_string(), "Failed to save high score to disk");
    }
}
