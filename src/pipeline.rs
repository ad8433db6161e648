//! Filter, sort and paginate over the fetched records.
//!
//! Everything here is pure. The result of a run is a list of positions into
//! the full record slice, the same way the list view keeps indices into its
//! in-memory cache instead of cloning rows.

use crate::bookmarks::BookmarkSet;
use crate::record::Record;
use std::cmp::Ordering;
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Keep fetch order.
    #[default]
    Default,
    Name,
}

impl SortMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Default => Self::Name,
            Self::Name => Self::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Name => "Name (A-Z)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    Bookmarks,
}

/// Current search/category/sort/view selection plus the 1-based page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    /// `None` means every category.
    pub category: Option<String>,
    pub sort: SortMode,
    pub view: ViewMode,
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            sort: SortMode::Default,
            view: ViewMode::All,
            page: 1,
        }
    }
}

/// Does the record at `position` pass the current filter?
pub fn matches(
    record: &Record,
    position: usize,
    state: &FilterState,
    bookmarks: &BookmarkSet,
) -> bool {
    let query = state.search.to_lowercase();
    let matches_search = query.is_empty()
        || record
            .name
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&query))
        || record
            .code
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&query));

    let matches_category = match state.category {
        None => true,
        Some(ref cat) => record.category.as_deref() == Some(cat.as_str()),
    };

    let matches_view = match state.view {
        ViewMode::All => true,
        ViewMode::Bookmarks => bookmarks.contains(&record.identity_key(position)),
    };

    matches_search && matches_category && matches_view
}

pub fn filter_indices(records: &[Record], state: &FilterState, bookmarks: &BookmarkSet) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(i, r)| matches(r, *i, state, bookmarks))
        .map(|(i, _)| i)
        .collect()
}

/// Base letters only: decomposed, combining marks dropped, case-folded.
fn primary_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collation in the spirit of a root-locale compare. Base letters decide
/// first, then accents, then case, with the raw text as the last tiebreak so
/// the order is total.
pub fn name_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| {
            let fold = |s: &str| s.nfd().flat_map(char::to_lowercase).collect::<String>();
            fold(a).cmp(&fold(b))
        })
        .then_with(|| a.cmp(b))
}

pub fn sort_indices(records: &[Record], indices: &mut [usize], sort: SortMode) {
    if sort == SortMode::Name {
        // Stable, so equal names keep fetch order.
        indices.sort_by(|&a, &b| {
            name_cmp(
                records[a].name.as_deref().unwrap_or(""),
                records[b].name.as_deref().unwrap_or(""),
            )
        });
    }
}

/// Filter then sort. The page number is not consulted.
pub fn derive(records: &[Record], state: &FilterState, bookmarks: &BookmarkSet) -> Vec<usize> {
    let mut indices = filter_indices(records, state, bookmarks);
    sort_indices(records, &mut indices, state.sort);
    indices
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Range of the 1-based `page` within `total` items. Out of range pages are empty.
pub fn page_range(total: usize, page: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(total);
    let end = (start + PAGE_SIZE).min(total);
    start..end
}

pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    &items[page_range(items.len(), page)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(code: &str, name: Option<&str>, category: Option<&str>) -> Record {
        Record {
            code: Some(code.to_string()),
            name: name.map(String::from),
            category: category.map(String::from),
            ..Default::default()
        }
    }

    fn names(records: &[Record], idx: &[usize]) -> Vec<String> {
        idx.iter()
            .map(|&i| records[i].display_name().to_string())
            .collect()
    }

    #[test]
    fn test_sort_by_name_scenario() {
        let records = vec![rec("A1", Some("Zeta"), None), rec("A2", Some("Alpha"), None)];
        let state = FilterState {
            sort: SortMode::Name,
            ..Default::default()
        };
        let idx = derive(&records, &state, &BookmarkSet::new());
        assert_eq!(names(&records, &idx), vec!["Alpha", "Zeta"]);

        let idx = derive(&records, &FilterState::default(), &BookmarkSet::new());
        assert_eq!(names(&records, &idx), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_sort_by_name_collates_accents() {
        let records = vec![
            rec("A1", Some("Zeta"), None),
            rec("A2", Some("Élan"), None),
            rec("A3", Some("Echo"), None),
            rec("A4", Some("elan"), None),
        ];
        let state = FilterState {
            sort: SortMode::Name,
            ..Default::default()
        };
        let idx = derive(&records, &state, &BookmarkSet::new());
        assert_eq!(names(&records, &idx), vec!["Echo", "elan", "Élan", "Zeta"]);
    }

    #[test]
    fn test_name_cmp_levels() {
        assert_eq!(name_cmp("apple", "Äpfel"), Ordering::Greater);
        assert_eq!(name_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(name_cmp("Résumé", "résumé"), Ordering::Less);
        assert_eq!(name_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_search_matches_code_case_insensitively() {
        let records = vec![rec("A1", Some("Zeta"), None), rec("B2", Some("Alpha"), None)];
        let state = FilterState {
            search: "a1".to_string(),
            ..Default::default()
        };
        assert_eq!(derive(&records, &state, &BookmarkSet::new()), vec![0]);

        let state = FilterState {
            search: "ALP".to_string(),
            ..Default::default()
        };
        assert_eq!(derive(&records, &state, &BookmarkSet::new()), vec![1]);
    }

    #[test]
    fn test_category_filter() {
        let records = vec![
            rec("A1", None, Some("Games")),
            rec("A2", None, Some("Apps")),
            rec("A3", None, None),
        ];
        let state = FilterState {
            category: Some("Apps".to_string()),
            ..Default::default()
        };
        assert_eq!(derive(&records, &state, &BookmarkSet::new()), vec![1]);
        assert_eq!(
            derive(&records, &FilterState::default(), &BookmarkSet::new()),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_bookmark_view_uses_identity_key() {
        let records = vec![
            rec("A1", Some("One"), None),
            Record {
                name: Some("Nameless code".to_string()),
                ..Default::default()
            },
            Record::default(),
        ];
        let mut bookmarks = BookmarkSet::new();
        bookmarks.toggle(&records[1].identity_key(1));
        bookmarks.toggle(&records[2].identity_key(2));

        let state = FilterState {
            view: ViewMode::Bookmarks,
            ..Default::default()
        };
        assert_eq!(derive(&records, &state, &bookmarks), vec![1, 2]);
    }

    #[test]
    fn test_missing_names_sort_first() {
        let records = vec![
            rec("A1", Some("beta"), None),
            rec("A2", None, None),
            rec("A3", Some("Alpha"), None),
        ];
        let state = FilterState {
            sort: SortMode::Name,
            ..Default::default()
        };
        assert_eq!(derive(&records, &state, &BookmarkSet::new()), vec![1, 2, 0]);
    }

    #[test]
    fn test_page_range_edges() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(9), 1);
        assert_eq!(page_count(10), 2);
        assert_eq!(page_range(10, 1), 0..9);
        assert_eq!(page_range(10, 2), 9..10);
        assert_eq!(page_range(10, 3), 10..10);
        assert_eq!(page_range(10, 0), 0..9);
        assert!(page_slice(&[1, 2, 3], 2).is_empty());
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        (
            "[A-C][0-9]",
            proptest::option::of("[a-zA-Z ]{0,6}"),
            proptest::option::of(prop_oneof!["Games", "Apps"]),
        )
            .prop_map(|(code, name, category)| Record {
                code: Some(code),
                name,
                category: category.map(String::from),
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(
            records in proptest::collection::vec(arb_record(), 0..30),
            search in "[a-cA-C0-9]{0,2}",
            bookmarked in proptest::collection::vec("[A-C][0-9]", 0..6),
            only_bookmarks in any::<bool>(),
        ) {
            let bookmarks: BookmarkSet = bookmarked.into_iter().collect();
            let state = FilterState {
                search,
                view: if only_bookmarks { ViewMode::Bookmarks } else { ViewMode::All },
                ..Default::default()
            };
            let once: Vec<Record> = filter_indices(&records, &state, &bookmarks)
                .into_iter()
                .map(|i| records[i].clone())
                .collect();
            let twice: Vec<Record> = filter_indices(&once, &state, &bookmarks)
                .into_iter()
                .map(|i| once[i].clone())
                .collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_pagination_partitions(total in 0usize..200) {
            let items: Vec<usize> = (0..total).collect();
            let pages = page_count(total);
            prop_assert_eq!(pages, (total + PAGE_SIZE - 1) / PAGE_SIZE);

            let mut seen = Vec::new();
            for p in 1..=pages {
                let slice = page_slice(&items, p);
                prop_assert!(!slice.is_empty() && slice.len() <= PAGE_SIZE);
                seen.extend_from_slice(slice);
            }
            prop_assert_eq!(seen, items.clone());

            if pages > 0 {
                let expected_last = if total % PAGE_SIZE == 0 { PAGE_SIZE } else { total % PAGE_SIZE };
                prop_assert_eq!(page_slice(&items, pages).len(), expected_last);
            }
        }

        #[test]
        fn prop_sort_by_name_is_non_decreasing(records in proptest::collection::vec(arb_record(), 0..30)) {
            let state = FilterState { sort: SortMode::Name, ..Default::default() };
            let idx = derive(&records, &state, &BookmarkSet::new());
            prop_assert_eq!(idx.len(), records.len());
            for pair in idx.windows(2) {
                let a = records[pair[0]].name.as_deref().unwrap_or("");
                let b = records[pair[1]].name.as_deref().unwrap_or("");
                prop_assert_ne!(name_cmp(a, b), Ordering::Greater);
            }
        }
    }
}
