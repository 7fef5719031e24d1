use std::{fs, io, path::PathBuf};

use gridsurge_engine::{HighScoreStore, StoreError};
use serde::{Deserialize, Serialize};

/// On-disk layout of the high score file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: usize,
}

/// Keeps the high score in a small JSON file.
///
/// A missing file reads as 0; parent directories are created on first save.
#[derive(Debug, Clone)]
pub struct JsonFileHighScore {
    path: PathBuf,
}

impl JsonFileHighScore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> Result<usize, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: usize) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("gridsurge-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = JsonFileHighScore::new(temp_path("missing/high_score.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved/high_score.json");
        let mut store = JsonFileHighScore::new(path.clone());
        store.save(1234).unwrap();
        assert_eq!(store.load().unwrap(), 1234);
        assert_eq!(
            JsonFileHighScore::new(path.clone()).load().unwrap(),
            1234
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt/high_score.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert!(JsonFileHighScore::new(path.clone()).load().is_err());
        fs::remove_file(path).unwrap();
    }
}
