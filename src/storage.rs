use crate::bookmarks::BookmarkSet;
use crate::error::CatalogError;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const KEY_BOOKMARKS: &str = "bookmarks";
pub const KEY_THEME: &str = "theme";
pub const KEY_MODAL_DISMISSED: &str = "donateDismissed";

const STORAGE_FILE: &str = "storage.json";

/// String key-value storage with the semantics of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CatalogError>;
}

/// Key-value store kept as one JSON object on disk.
///
/// Every `set` rewrites the whole file. There is no locking; two processes
/// writing at once can lose each other's updates.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `storage.json` under `dir`. Unreadable or corrupt files start empty.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE);
        let entries = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt storage file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable storage file, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn flush(&self) -> Result<(), CatalogError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let bytes = serde_json::to_vec_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CatalogError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CatalogError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than "dark" reads as light.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }
}

/// Typed view over the three persisted preferences.
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn bookmarks(&self) -> BookmarkSet {
        let Some(raw) = self.store.get(KEY_BOOKMARKS) else {
            return BookmarkSet::new();
        };
        BookmarkSet::from_json(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "stored bookmarks unreadable, ignoring");
            BookmarkSet::new()
        })
    }

    pub fn save_bookmarks(&mut self, bookmarks: &BookmarkSet) -> Result<(), CatalogError> {
        self.store.set(KEY_BOOKMARKS, &bookmarks.to_json())
    }

    pub fn theme(&self) -> Theme {
        Theme::parse(self.store.get(KEY_THEME).as_deref())
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), CatalogError> {
        self.store.set(KEY_THEME, theme.as_str())
    }

    /// True once the user has opted out of the promotional modal.
    pub fn modal_dismissed(&self) -> bool {
        self.store
            .get(KEY_MODAL_DISMISSED)
            .is_some_and(|v| !v.is_empty())
    }

    pub fn dismiss_modal_forever(&mut self) -> Result<(), CatalogError> {
        self.store.set(KEY_MODAL_DISMISSED, "true")
    }
}
