use crate::error::CatalogError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Shown in place of a missing name.
pub const NAME_FALLBACK: &str = "Tanpa Nama";

/// One catalog entry as served by the sheet API.
///
/// Every field is optional. Sheet cells arrive as strings, numbers, booleans
/// or nulls; empty cells and nulls are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(rename = "Kode", default, deserialize_with = "loose_string")]
    pub code: Option<String>,
    #[serde(rename = "Nama", default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    #[serde(rename = "Kategori", default, deserialize_with = "loose_string")]
    pub category: Option<String>,
    #[serde(rename = "Thumbnail", default, deserialize_with = "loose_string")]
    pub thumbnail: Option<String>,
    #[serde(rename = "Link5MB", default, deserialize_with = "loose_string")]
    pub link_compact: Option<String>,
    #[serde(rename = "LinkDrive", default, deserialize_with = "loose_string")]
    pub link_full: Option<String>,
    #[serde(rename = "LinkTikTok", default, deserialize_with = "loose_string")]
    pub link_watch: Option<String>,
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        // Zero reads as an empty cell, like the other falsy values.
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    })
}

/// The named link slots a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSlot {
    Compact,
    Full,
    Watch,
}

impl LinkSlot {
    pub const ALL: [LinkSlot; 3] = [Self::Compact, Self::Full, Self::Watch];

    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "5MB",
            Self::Full => "XML",
            Self::Watch => "Watch",
        }
    }

    /// Only the compact and full links get a copy control.
    pub fn is_copyable(self) -> bool {
        matches!(self, Self::Compact | Self::Full)
    }
}

impl Record {
    pub fn link(&self, slot: LinkSlot) -> Option<&str> {
        match slot {
            LinkSlot::Compact => self.link_compact.as_deref(),
            LinkSlot::Full => self.link_full.as_deref(),
            LinkSlot::Watch => self.link_watch.as_deref(),
        }
    }

    /// Slots that are present on this record, in display order.
    pub fn present_links(&self) -> impl Iterator<Item = (LinkSlot, &str)> {
        LinkSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.link(slot).map(|l| (slot, l)))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NAME_FALLBACK)
    }

    /// Key used for bookmarking: code, then name, then the first link,
    /// then the record's position in the fetched collection.
    pub fn identity_key(&self, position: usize) -> String {
        self.code
            .as_deref()
            .or(self.name.as_deref())
            .or_else(|| self.present_links().next().map(|(_, l)| l))
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", position))
    }
}

/// Decode the endpoint body. Anything other than a JSON array of objects fails.
pub fn parse_records(body: &[u8]) -> Result<Vec<Record>, CatalogError> {
    serde_json::from_slice::<Vec<Record>>(body).map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Distinct non-empty categories in first-seen order.
pub fn categories(records: &[Record]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for cat in records.iter().filter_map(|r| r.category.as_ref()) {
        if !out.contains(cat) {
            out.push(cat.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: Option<&str>, name: Option<&str>) -> Record {
        Record {
            code: code.map(String::from),
            name: name.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_loose_fields() {
        let body = br#"[
            {"Kode": 17, "Nama": "Alpha", "Kategori": "", "Link5MB": "https://a/5", "Extra": [1,2]},
            {"Kode": null, "Nama": "Beta", "LinkDrive": "https://b/x", "LinkTikTok": "https://t/b"}
        ]"#;
        let rows = parse_records(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code.as_deref(), Some("17"));
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[0].link(LinkSlot::Compact), Some("https://a/5"));
        assert_eq!(rows[1].code, None);
        assert_eq!(rows[1].link(LinkSlot::Watch), Some("https://t/b"));
    }

    #[test]
    fn test_zero_cells_read_as_absent() {
        let body = br#"[{"Kode": 0, "Nama": 0.0, "Kategori": false, "Link5MB": 5}]"#;
        let rows = parse_records(body).unwrap();
        assert_eq!(rows[0].code, None);
        assert_eq!(rows[0].display_name(), NAME_FALLBACK);
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[0].link(LinkSlot::Compact), Some("5"));
        assert_eq!(rows[0].identity_key(3), "5");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(parse_records(br#"{"error":"nope"}"#), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_records(b"<html>"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_identity_key_fallback_chain() {
        assert_eq!(record(Some("A1"), Some("Zeta")).identity_key(4), "A1");
        assert_eq!(record(None, Some("Zeta")).identity_key(4), "Zeta");

        let linked = Record {
            link_full: Some("https://full".to_string()),
            link_watch: Some("https://watch".to_string()),
            ..Default::default()
        };
        assert_eq!(linked.identity_key(4), "https://full");

        assert_eq!(Record::default().identity_key(4), "#4");
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(record(Some("A1"), None).display_name(), NAME_FALLBACK);
        assert_eq!(record(Some("A1"), Some("Zeta")).display_name(), "Zeta");
    }

    #[test]
    fn test_present_links_order_and_copyable() {
        let r = Record {
            link_watch: Some("w".to_string()),
            link_compact: Some("c".to_string()),
            ..Default::default()
        };
        let slots: Vec<LinkSlot> = r.present_links().map(|(s, _)| s).collect();
        assert_eq!(slots, vec![LinkSlot::Compact, LinkSlot::Watch]);
        assert!(LinkSlot::Compact.is_copyable());
        assert!(LinkSlot::Full.is_copyable());
        assert!(!LinkSlot::Watch.is_copyable());
    }

    #[test]
    fn test_categories_first_seen_distinct() {
        let mut rows = vec![Record::default(); 4];
        rows[0].category = Some("Games".to_string());
        rows[1].category = Some("Apps".to_string());
        rows[2].category = Some("Games".to_string());
        assert_eq!(categories(&rows), vec!["Games".to_string(), "Apps".to_string()]);
    }
}
