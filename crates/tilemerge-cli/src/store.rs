use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tilemerge_engine::{BestScoreStore, StoreError};
use tracing::debug;

/// Contents of the best score file: one score per key.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct ScoreFile {
    scores: BTreeMap<String, u64>,
}

/// Best score kept under a named key in a JSON file.
///
/// A missing file or key reads as 0. Writes keep the other keys of the file intact and
/// go through a temporary file that is renamed over the original.
#[derive(Debug, Clone)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            key: key.into(),
        }
    }

    fn load(&self) -> Result<ScoreFile, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ScoreFile::default()),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&json).map_err(|err| StoreError::Malformed {
            message: format!("{}: {err}", self.path.display()),
        })
    }

    fn save(&self, file: &ScoreFile) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(file).map_err(|err| StoreError::Malformed {
            message: err.to_string(),
        })?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl BestScoreStore for JsonFileStore {
    fn get(&self) -> Result<u64, StoreError> {
        let file = self.load()?;
        Ok(file.scores.get(&self.key).copied().unwrap_or(0))
    }

    fn set(&mut self, value: u64) -> Result<(), StoreError> {
        let mut file = self.load()?;
        file.scores.insert(self.key.clone(), value);
        self.save(&file)?;
        debug!(path = %self.path.display(), key = %self.key, value, "best score saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("best.json"), "best_score");
        assert_eq!(store.get().unwrap(), 0);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/best.json");
        let mut store = JsonFileStore::new(&path, "best_score");
        store.set(1024).unwrap();
        assert_eq!(store.get().unwrap(), 1024);

        let reopened = JsonFileStore::new(&path, "best_score");
        assert_eq!(reopened.get().unwrap(), 1024);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        let mut four = JsonFileStore::new(&path, "4x4");
        let mut five = JsonFileStore::new(&path, "5x5");
        four.set(100).unwrap();
        five.set(200).unwrap();
        assert_eq!(four.get().unwrap(), 100);
        assert_eq!(five.get().unwrap(), 200);

        let json = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::new(&path, "best_score");
        assert!(matches!(store.get(), Err(StoreError::Malformed { .. })));
        // the broken file is left alone rather than overwritten
        assert!(store.set(10).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        let store = JsonFileStore::new(dir.path(), "best_score");
        assert!(matches!(store.get(), Err(StoreError::Io(_))));
    }
}
