use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::models::Todo;

/// Fixed blob name the whole canonical collection lives under.
const DATA_FILE: &str = "todos.json";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        StorageError::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Json(value)
    }
}

pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Loads the canonical collection. A missing or unparseable blob is
    /// not an error: the user starts fresh with an empty collection.
    pub fn load(&self) -> Vec<Todo> {
        let path = self.root.join(DATA_FILE);
        let mut buf = String::new();
        match File::open(&path).and_then(|mut file| file.read_to_string(&mut buf)) {
            Ok(_) => {}
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("could not read {}: {err}", path.display());
                }
                return Vec::new();
            }
        }
        match serde_json::from_str(&buf) {
            Ok(todos) => todos,
            Err(err) => {
                log::warn!("corrupt todo data in {}: {err}", path.display());
                Vec::new()
            }
        }
    }

    pub fn save(&self, todos: &[Todo]) -> Result<(), StorageError> {
        self.write_atomic(self.root.join(DATA_FILE), todos)
    }

    fn write_atomic<T: serde::Serialize + ?Sized>(
        &self,
        path: PathBuf,
        data: &T,
    ) -> Result<(), StorageError> {
        let temp_path = path.with_extension("tmp");
        let json = serde_json::to_vec_pretty(data)?;
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(temp_path, path)?;
        Ok(())
    }
}
