use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, BoardSave};

use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File-backed store for the pitch-board blob. One store instance per save
/// directory; no global state, so tests can point each store at a temp dir.
pub struct BoardStore {
    dir: PathBuf,
}

impl BoardStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self) -> PathBuf {
        self.dir.join("pitch_board.dat")
    }

    pub fn exists(&self) -> bool {
        self.blob_path().exists()
    }

    /// Persist the blob atomically: write to a temp file, fsync, rename.
    pub fn save(&self, save: &BoardSave) -> Result<(), SaveError> {
        let path = self.blob_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(save)?;
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &path)?;

        log::debug!("saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    pub fn load(&self) -> Result<BoardSave, SaveError> {
        let path = self.blob_path();
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }
        Self::read_blob(&path)
    }

    /// Missing or corrupt blobs degrade silently to "no saved state".
    pub fn load_or_none(&self) -> Option<BoardSave> {
        match self.load() {
            Ok(save) => Some(save),
            Err(SaveError::FileNotFound { .. }) => None,
            Err(err) => {
                log::warn!("discarding unreadable board save: {}", err);
                None
            }
        }
    }

    pub fn delete(&self) -> Result<(), SaveError> {
        let path = self.blob_path();
        if path.exists() {
            remove_file(&path)?;
            log::info!("deleted board save {:?}", path);
        }
        Ok(())
    }

    fn read_blob(path: &Path) -> Result<BoardSave, SaveError> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        let save = decompress_and_deserialize(&data)?;
        log::debug!("loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}
