use anyhow::{Context, Result};
use mowaqetak_core::KeyValueStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `$MOWAQETAK_HOME`, else `$HOME/.mowaqetak`.
pub fn mowaqetak_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MOWAQETAK_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".mowaqetak"))
}

pub fn ensure_mowaqetak_home() -> Result<PathBuf> {
    let dir = mowaqetak_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(ensure_mowaqetak_home()?))
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let p = self.path_for(key);
        if !p.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        Ok(Some(s))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| format!("create {}", self.dir.display()))?;
        let p = self.path_for(key);
        // The slot is replaced atomically.
        let tmp = p.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &p).with_context(|| format!("rename to {}", p.display()))?;
        debug!(path = %p.display(), "stored {key}");
        Ok(())
    }
}
