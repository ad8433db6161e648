use crate::bookmarks::BookmarkSet;
use crate::clipboard::{Clipboard, copy_link};
use crate::config::Config;
use crate::intent::Intent;
use crate::pipeline::{self, FilterState, PAGE_SIZE};
use crate::record::{LinkSlot, Record, categories};
use crate::storage::{Preferences, Theme};
use crate::toast::ToastSlot;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 3;

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Promotional overlay shown at startup until the user opts out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub open: bool,
    /// "Don't show again" checkbox.
    pub opt_out: bool,
}

pub type LinkOpener = fn(&str) -> std::io::Result<()>;

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub input_mode: InputMode,

    // Full record set, replaced wholesale on fetch
    pub records: Vec<Record>,
    pub categories: Vec<String>,

    // Filter state and the derived, sorted positions into `records`
    pub filter: FilterState,
    pub visible: Vec<usize>,
    /// Selected card, relative to the current page.
    pub selected: usize,

    pub bookmarks: BookmarkSet,
    pub theme: Theme,

    pub loading: bool,
    pub load_error: Option<String>,

    pub modal: ModalState,
    pub toast: ToastSlot,

    prefs: Preferences,
    clipboard: Box<dyn Clipboard>,
    opener: LinkOpener,
}

impl App {
    pub fn new(prefs: Preferences, clipboard: Box<dyn Clipboard>, config: &Config) -> Self {
        let bookmarks = prefs.bookmarks();
        let theme = prefs.theme();
        let modal_open = !prefs.modal_dismissed();

        Self {
            should_quit: false,
            show_help: false,
            input_mode: InputMode::Normal,

            records: Vec::new(),
            categories: Vec::new(),

            filter: FilterState::default(),
            visible: Vec::new(),
            selected: 0,

            bookmarks,
            theme,

            loading: false,
            load_error: None,

            modal: ModalState {
                open: modal_open,
                opt_out: false,
            },
            toast: ToastSlot::new(config.toast_visible(), config.toast_fade()),

            prefs,
            clipboard,
            opener: open_in_browser,
        }
    }

    #[cfg(test)]
    pub fn with_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    /// Mark the fetch as in flight. The loader stays up until `FetchFinished`.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Single state-transition entry point.
    pub fn update(&mut self, intent: Intent) {
        match intent {
            Intent::SetSearch(text) => {
                self.filter.search = text;
                self.refilter();
            }
            Intent::BeginSearch => self.input_mode = InputMode::Editing,
            Intent::EndSearch => self.input_mode = InputMode::Normal,
            Intent::SetCategory(category) => {
                self.filter.category = category;
                self.refilter();
            }
            Intent::SetSort(mode) => {
                self.filter.sort = mode;
                self.refilter();
            }
            Intent::SetView(view) => {
                self.filter.view = view;
                self.refilter();
            }
            Intent::SetPage(page) => self.set_page(page),
            Intent::NextPage => self.set_page(self.filter.page.saturating_add(1)),
            Intent::PrevPage => self.set_page(self.filter.page.saturating_sub(1)),
            Intent::MoveSelection { dx, dy } => self.move_selection(dx, dy),
            Intent::ToggleFavorite(key) => self.toggle_favorite(&key),
            Intent::CopyLink(slot) => {
                let link = self
                    .selected_record()
                    .and_then(|r| r.link(slot))
                    .map(str::to_string);
                let outcome = copy_link(self.clipboard.as_mut(), link.as_deref());
                self.toast.show(outcome.message(), Instant::now());
            }
            Intent::OpenLink(slot) => self.open_link(slot),
            Intent::ToggleTheme => {
                self.theme = self.theme.toggled();
                if let Err(e) = self.prefs.save_theme(self.theme) {
                    warn!(error = %e, "failed to persist theme");
                    self.toast.show("Could not save theme", Instant::now());
                }
            }
            Intent::ToggleModalOptOut => self.modal.opt_out = !self.modal.opt_out,
            Intent::DismissModal => {
                if self.modal.opt_out {
                    if let Err(e) = self.prefs.dismiss_modal_forever() {
                        warn!(error = %e, "failed to persist modal opt-out");
                    }
                }
                self.modal.open = false;
            }
            Intent::ToggleHelp => self.show_help = !self.show_help,
            Intent::FetchFinished(result) => {
                self.loading = false;
                match result {
                    Ok(records) => {
                        info!(count = records.len(), "record set replaced");
                        self.categories = categories(&records);
                        self.records = records;
                        if let Some(ref cat) = self.filter.category {
                            if !self.categories.contains(cat) {
                                self.filter.category = None;
                            }
                        }
                        self.refilter();
                    }
                    Err(e) => {
                        warn!(error = %e, "keeping previous record set");
                        self.load_error = Some(e.user_message());
                    }
                }
            }
            Intent::Tick(now) => self.toast.tick(now),
            Intent::Quit => self.should_quit = true,
        }
    }

    /// Re-run the pipeline after a filter input changed. Always back to page 1.
    fn refilter(&mut self) {
        self.visible = pipeline::derive(&self.records, &self.filter, &self.bookmarks);
        self.filter.page = 1;
        self.selected = 0;
        self.load_error = None;
        debug!(
            visible = self.visible.len(),
            search = %self.filter.search,
            "pipeline run"
        );
    }

    /// Category one step forward or back from the current one, cycling
    /// through "all" (`None`) and then each category in first-seen order.
    pub fn adjacent_category(&self, forward: bool) -> Option<String> {
        // Slot 0 is "all categories".
        let slots = self.categories.len() + 1;
        let current = match self.filter.category {
            None => 0,
            Some(ref cat) => self
                .categories
                .iter()
                .position(|c| c == cat)
                .map_or(0, |i| i + 1),
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        next.checked_sub(1).map(|i| self.categories[i].clone())
    }

    fn set_page(&mut self, page: usize) {
        self.filter.page = page.clamp(1, self.total_pages());
        self.selected = 0;
    }

    fn move_selection(&mut self, dx: i32, dy: i32) {
        let len = self.page_positions().len();
        if len == 0 {
            return;
        }
        let target = self.selected as i64 + dx as i64 + dy as i64 * GRID_COLUMNS as i64;
        self.selected = target.clamp(0, len as i64 - 1) as usize;
    }

    fn toggle_favorite(&mut self, key: &str) {
        let now_favorite = self.bookmarks.toggle(key);
        debug!(key, now_favorite, "favorite toggled");
        if let Err(e) = self.prefs.save_bookmarks(&self.bookmarks) {
            warn!(error = %e, "failed to persist bookmarks");
            self.toast.show("Could not save bookmarks", Instant::now());
        }

        // Re-derive so the card can drop out of the bookmarks view. Not a
        // filter change, so no jump back to page 1; stay put unless the page vanished.
        let page = self.filter.page;
        let selected = self.selected;
        self.visible = pipeline::derive(&self.records, &self.filter, &self.bookmarks);
        self.filter.page = page.clamp(1, self.total_pages());
        let len = self.page_positions().len();
        self.selected = selected.min(len.saturating_sub(1));
    }

    fn open_link(&mut self, slot: LinkSlot) {
        let Some(link) = self.selected_record().and_then(|r| r.link(slot)).map(str::to_string) else {
            self.toast.show("No link", Instant::now());
            return;
        };
        match (self.opener)(&link) {
            Ok(()) => self.toast.show(format!("Opening {}", slot.label()), Instant::now()),
            Err(e) => {
                warn!(error = %e, link = %link, "failed to open link");
                self.toast.show("Could not open link", Instant::now());
            }
        }
    }

    /// Pages for the current result; an empty result still has page 1.
    pub fn total_pages(&self) -> usize {
        pipeline::page_count(self.visible.len()).max(1)
    }

    /// Record positions shown on the current page.
    pub fn page_positions(&self) -> &[usize] {
        pipeline::page_slice(&self.visible, self.filter.page)
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.page_positions().get(self.selected).copied()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selected_position().map(|pos| &self.records[pos])
    }

    /// Identity key of the selected card.
    pub fn selected_key(&self) -> Option<String> {
        self.selected_position()
            .map(|pos| self.records[pos].identity_key(pos))
    }

    pub fn is_favorite(&self, position: usize) -> bool {
        self.bookmarks
            .contains(&self.records[position].identity_key(position))
    }

    /// Label for the category selector.
    pub fn category_label(&self) -> &str {
        self.filter.category.as_deref().unwrap_or("All")
    }

    /// "x-y of n" for the footer.
    pub fn range_label(&self) -> String {
        let range = pipeline::page_range(self.visible.len(), self.filter.page);
        if range.is_empty() {
            format!("0 of {}", self.visible.len())
        } else {
            format!("{}-{} of {}", range.start + 1, range.end, self.visible.len())
        }
    }
}

const _: () = assert!(PAGE_SIZE % GRID_COLUMNS == 0);

/// Hand the link to the platform opener.
pub fn open_in_browser(link: &str) -> std::io::Result<()> {
    let program = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    std::process::Command::new(program)
        .arg(link)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(())
}
