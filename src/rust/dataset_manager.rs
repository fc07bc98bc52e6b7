use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::dataset::{Dataset, DatasetError};

/// Name of the corpus file inside the data directory.
pub const CORPUS_FILE: &str = "corpus.csv";

/// Loads and saves the training corpus on disk.
#[derive(Debug, Clone)]
pub struct DatasetManager {
    data_dir: PathBuf,
}

impl DatasetManager {
    /// Creates a new DatasetManager with the default data directory
    pub fn new_default() -> Result<Self, DatasetError> {
        Self::new(Self::get_default_data_dir())
    }

    /// Returns the default data directory path
    pub fn get_default_data_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("BAYESLENS_DATA") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("bayeslens");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".local").join("share").join("bayeslens");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("bayeslens")
    }

    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, DatasetError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.data_dir.join(CORPUS_FILE)
    }

    /// Reads a corpus from a CSV file.
    pub fn load(&self, path: &Path) -> Result<Dataset, DatasetError> {
        log::info!("Loading corpus from {:?}", path);
        let content = fs::read_to_string(path)?;
        let dataset = Dataset::from_csv(&content)?;
        log::info!("Loaded {} examples", dataset.len());
        Ok(dataset)
    }

    /// Writes a corpus to a CSV file, replacing it atomically.
    pub fn save(&self, dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
        let parent_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(dataset.to_csv().as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| DatasetError::Io(e.error))?;

        log::info!("Saved {} examples to {:?}", dataset.len(), path);
        Ok(())
    }

    /// Loads the corpus at `path`, or the seed corpus if the file does not exist yet.
    pub fn load_or_seed(&self, path: &Path) -> Result<Dataset, DatasetError> {
        if path.exists() {
            self.load(path)
        } else {
            log::warn!("No corpus at {:?}, starting from the seed examples", path);
            Ok(Dataset::seed())
        }
    }

    /// Overwrites the corpus at `path` with the seed examples without reading it,
    /// so an unreadable file can still be recovered.
    pub fn reset(&self, path: &Path) -> Result<Dataset, DatasetError> {
        let dataset = Dataset::seed();
        self.save(&dataset, path)?;
        Ok(dataset)
    }

    /// Removes the stored corpus, if any.
    pub fn remove(&self, path: &Path) -> Result<(), DatasetError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir() {
        env::set_var("BAYESLENS_DATA", "/tmp/test-bayeslens");
        let path = DatasetManager::get_default_data_dir();
        assert_eq!(path, PathBuf::from("/tmp/test-bayeslens"));
        env::remove_var("BAYESLENS_DATA");

        let path = DatasetManager::get_default_data_dir();
        assert!(path.to_string_lossy().contains("bayeslens"));
    }

    #[test]
    fn test_save_then_load() -> Result<(), DatasetError> {
        let dir = tempfile::tempdir()?;
        let manager = DatasetManager::new(dir.path())?;
        let path = manager.corpus_path();

        let mut dataset = Dataset::seed();
        dataset.add("petroleo, ouro e dolar", "alta")?;
        manager.save(&dataset, &path)?;

        assert_eq!(manager.load(&path)?, dataset);
        Ok(())
    }
}
