use chrono::{DateTime, TimeZone};
use std::fmt::Write;

/// Text of the strip clock, refreshed by the one-second tick.
#[derive(Debug, Clone)]
pub struct ClockLabel {
    format: String,
    text:   String,
}

impl ClockLabel {
    pub fn new(format: impl Into<String>) -> Self {
        Self { format: format.into(), text: String::new() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-render for `now`.  Returns `true` when the visible text changed.
    ///
    /// An invalid `strftime` pattern falls back to `HH:MM` instead of
    /// panicking inside chrono's `Display` impl.
    pub fn refresh<Tz>(&mut self, now: &DateTime<Tz>) -> bool
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut text = String::new();
        if write!(text, "{}", now.format(&self.format)).is_err() {
            text.clear();
            let _ = write!(text, "{}", now.format("%H:%M"));
        }

        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }
}
