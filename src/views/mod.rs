pub mod bookings;
pub mod create;
pub mod details;
pub mod search;
pub mod success;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::app::{Toast, ToastKind};
use crate::models::{available_actions, BookingStatus, StatusAction};

/// Command the user types to trigger a status action.
pub fn action_key(action: StatusAction) -> &'static str {
    match action {
        StatusAction::StartProcessing => "start",
        StatusAction::MarkComplete => "done",
        StatusAction::Cancel => "cancel",
    }
}

/// Resolve a typed command against the actions the status actually
/// offers. A key whose action is not on offer resolves to nothing, so
/// e.g. `done` on a confirmed booking cannot trigger the start step.
pub fn action_for_key(status: BookingStatus, key: &str) -> Option<StatusAction> {
    available_actions(status)
        .into_iter()
        .find(|action| action_key(*action) == key)
}

/// Affirmative answer to a yes/no prompt.
pub fn confirms(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn toast_line(toast: &Toast) -> String {
    let tag = match toast.kind {
        ToastKind::Success => "ok",
        ToastKind::Error => "error",
        ToastKind::Info => "info",
    };
    format!("[{tag}] {}", toast.message)
}

/// `2025-06-15` → `15 Jun 2025`; anything unparseable is shown as-is.
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Timestamps arrive in whatever shape the backend emits; try the common
/// ones and fall back to the raw string.
pub fn format_datetime(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%d %b %Y, %H:%M").to_string();
        }
    }
    raw.to_string()
}
