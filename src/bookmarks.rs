use std::collections::BTreeSet;

/// Set of bookmarked identity keys.
///
/// Persisted as a JSON array of strings. Duplicates in stored data collapse
/// on load, so a save/load round trip never grows the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    keys: BTreeSet<String>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Flip membership of `key`. Returns true if the key is now bookmarked.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn to_json(&self) -> String {
        // Serializing a set of strings cannot fail.
        serde_json::to_string(&self.keys).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let list: Vec<String> = serde_json::from_str(raw)?;
        Ok(list.into_iter().collect())
    }
}

impl FromIterator<String> for BookmarkSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
