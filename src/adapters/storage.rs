use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Reads inputs from the local file system and writes outputs under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    type Reader = File;

    fn open(&self, path: &Path) -> Result<File> {
        Ok(File::open(path)?)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            // 跟隨 symlink，失效連結直接略過
            if fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn output_path(&self, name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(name))
    }
}
