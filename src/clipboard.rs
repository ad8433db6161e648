use crate::error::CatalogError;
use tracing::warn;

/// Write-only clipboard access.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CatalogError>;
}

/// System clipboard backed by arboard, opened lazily on first copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CatalogError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        if let Some(ref mut clipboard) = self.inner {
            clipboard.set_text(text.to_string())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    NothingToCopy,
    Failed,
}

impl CopyOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Copied => "Link copied",
            Self::NothingToCopy => "No link to copy",
            Self::Failed => "Copy failed",
        }
    }
}

/// Copy `link` if there is one. An empty or missing link never touches the clipboard.
pub fn copy_link(clipboard: &mut dyn Clipboard, link: Option<&str>) -> CopyOutcome {
    let Some(link) = link.filter(|l| !l.is_empty()) else {
        return CopyOutcome::NothingToCopy;
    };
    match clipboard.set_text(link) {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            warn!(error = %e, "clipboard write failed");
            CopyOutcome::Failed
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every write; can be told to refuse.
    #[derive(Clone, Default)]
    pub struct MockClipboard {
        pub writes: Arc<Mutex<Vec<String>>>,
        pub deny: bool,
    }

    impl Clipboard for MockClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), CatalogError> {
            if self.deny {
                return Err(CatalogError::Clipboard("permission denied".to_string()));
            }
            self.writes.lock().expect("lock clipboard").push(text.to_string());
            Ok(())
        }
    }
}
