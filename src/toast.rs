use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

/// Single slot for transient messages. Showing a new one drops the old one.
#[derive(Debug, Clone)]
pub struct ToastSlot {
    current: Option<Toast>,
    visible_for: Duration,
    fade_for: Duration,
}

impl ToastSlot {
    pub fn new(visible_for: Duration, fade_for: Duration) -> Self {
        Self {
            current: None,
            visible_for,
            fade_for,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Toast {
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn phase(&self, now: Instant) -> Option<ToastPhase> {
        let toast = self.current.as_ref()?;
        let age = now.saturating_duration_since(toast.shown_at);
        Some(if age < self.visible_for {
            ToastPhase::Visible
        } else if age < self.visible_for + self.fade_for {
            ToastPhase::Fading
        } else {
            ToastPhase::Expired
        })
    }

    /// Drop the toast once it has fully faded.
    pub fn tick(&mut self, now: Instant) {
        if self.phase(now) == Some(ToastPhase::Expired) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}
