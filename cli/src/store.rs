use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ied_core::HighScoreStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Record {
    high_score: u32,
}

/// High score kept in a small JSON file.
///
/// A missing or unreadable file counts as a high score of 0, failed writes are
/// logged and otherwise ignored.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    high_score: u32,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let high_score = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Record>(&text) {
                Ok(record) => record.high_score,
                Err(err) => {
                    log::warn!("Ignoring corrupt high score file {}: {}", path.display(), err);
                    0
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => 0,
            Err(err) => {
                log::warn!("Could not read high score from {}: {}", path.display(), err);
                0
            }
        };
        Self { path, high_score }
    }

    fn write(&self) -> std::io::Result<()> {
        let record = Record {
            high_score: self.high_score,
        };
        let text = serde_json::to_string(&record)?;
        fs::write(&self.path, text)
    }
}

impl HighScoreStore for JsonFileStore {
    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn set_high_score(&mut self, score: u32) {
        self.high_score = score;
        if let Err(err) = self.write() {
            log::warn!("Could not save high score to {}: {}", self.path.display(), err);
        }
    }
}
