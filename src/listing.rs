use crate::bookmarks::BookmarkSet;
use crate::pipeline::{self, FilterState};
use crate::record::Record;
use std::fmt::Write;

/// Plain-text rendering of one page of the pipeline output, for `list`.
pub fn render_page(records: &[Record], state: &FilterState, bookmarks: &BookmarkSet) -> String {
    let visible = pipeline::derive(records, state, bookmarks);
    let pages = pipeline::page_count(visible.len()).max(1);
    let page = state.page.clamp(1, pages);
    let positions = pipeline::page_slice(&visible, page);

    let mut out = String::new();
    if positions.is_empty() {
        out.push_str("No data found.\n");
    }
    for &pos in positions {
        let record = &records[pos];
        let star = if bookmarks.contains(&record.identity_key(pos)) { "★" } else { " " };
        let _ = write!(
            out,
            "{} {:<8} {}",
            star,
            record.code.as_deref().unwrap_or("-"),
            record.display_name()
        );
        if let Some(ref cat) = record.category {
            let _ = write!(out, "  [{}]", cat);
        }
        out.push('\n');
        for (slot, link) in record.present_links() {
            let _ = writeln!(out, "    {:<6} {}", slot.label(), link);
        }
    }
    let _ = writeln!(out, "Page {} of {} ({} entries)", page, pages, visible.len());
    out
}
