//! Transient warning notices with timed auto-clear.

/// How long a warning stays visible before clearing itself.
pub const AUTO_CLEAR_MS: f64 = 3000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    clear_at_ms: f64,
}

/// Holds at most one active notice. Raising a new notice replaces the old
/// one and restarts the clear timer.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    active: Option<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, now_ms: f64, message: String) {
        self.active = Some(Notice {
            message,
            clear_at_ms: now_ms + AUTO_CLEAR_MS,
        });
    }

    /// Expire the notice once its timer passes. Safe to call every frame.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(notice) = &self.active {
            if now_ms >= notice.clear_at_ms {
                self.active = None;
            }
        }
    }

    pub fn active(&self) -> Option<&Notice> {
        self.active.as_ref()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
