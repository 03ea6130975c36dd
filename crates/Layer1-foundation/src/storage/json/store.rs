//! JSON 파일 저장소
//!
//! 디렉토리 하나 = 저장소 하나. 파일 단위로 읽고 쓴다.

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "codeforgex";
const PROJECT_DIR: &str = ".codeforgex";

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// ~/.config/codeforgex/
    pub fn global() -> Result<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR)))
            .ok_or_else(|| Error::Config("no user config directory on this platform".to_string()))
    }

    /// <root>/.codeforgex/
    pub fn project(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(PROJECT_DIR))
    }

    pub fn current_project() -> Result<Self> {
        Ok(Self::project(std::env::current_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// 파일이 없으면 `None`, 깨져 있으면 에러
    pub fn load_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.file_path(name);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Storage(format!("cannot read {}: {}", path.display(), e)))
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::Config(format!("{} is not valid: {}", path.display(), e)))
    }

    /// 없거나 깨진 파일은 기본값 (깨진 경우 경고)
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        self.load_optional(name)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable file");
                None
            })
            .unwrap_or_default()
    }

    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Storage(format!("cannot create {}: {}", self.dir.display(), e)))?;
        let path = self.file_path(name);
        let text = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, text)
            .map_err(|e| Error::Storage(format!("cannot write {}: {}", path.display(), e)))
    }
}

/// 여러 저장소의 같은 파일을 순서대로 겹쳐 읽는다 (뒤쪽이 우선)
pub fn load_layered<T, F>(stores: &[Option<&JsonStore>], name: &str, mut merge: F) -> Result<T>
where
    T: DeserializeOwned + Default,
    F: FnMut(&mut T, T),
{
    let mut value = T::default();
    for store in stores.iter().flatten() {
        if let Some(layer) = store.load_optional::<T>(name)? {
            tracing::debug!(path = %store.file_path(name).display(), "config layer loaded");
            merge(&mut value, layer);
        }
    }
    Ok(value)
}
