//! Hosting round model.
//!
//! A round is one scheduled occasion. Rounds are processed strictly in
//! ascending `order`; the optional date window is informational only.
//!
//! # Time Model
//! Date windows are half-open `[start, end)` intervals in milliseconds
//! since the Unix epoch.

use serde::{Deserialize, Serialize};

/// A date interval [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Window start (ms, inclusive).
    pub start_ms: i64,
    /// Window end (ms, exclusive).
    pub end_ms: i64,
}

impl DateWindow {
    /// Creates a new window.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }
}

/// A hosting round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Unique round identifier.
    pub id: String,
    /// Owning class identifier.
    #[serde(default)]
    pub class_id: String,
    /// Display name.
    pub name: String,
    /// When the round takes place.
    #[serde(default)]
    pub date_window: Option<DateWindow>,
    /// Chronological position (unique within a class).
    pub order: i32,
}

impl Round {
    /// Creates a round at the given position.
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            class_id: String::new(),
            name: name.into(),
            date_window: None,
            order,
        }
    }

    /// Sets the owning class.
    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = class_id.into();
        self
    }

    /// Sets the date window.
    pub fn with_date_window(mut self, start_ms: i64, end_ms: i64) -> Self {
        self.date_window = Some(DateWindow::new(start_ms, end_ms));
        self
    }
}

/// Returns the rounds sorted by `order` (stable for equal orders).
pub fn sorted_rounds(rounds: &[Round]) -> Vec<&Round> {
    let mut sorted: Vec<&Round> = rounds.iter().collect();
    sorted.sort_by_key(|r| r.order);
    sorted
}
