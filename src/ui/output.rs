//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! User-facing lines go to stdout and respect `--quiet`; errors go to
//! stderr and are always shown. Machine-readable output (`events --json`)
//! bypasses these helpers so that `--quiet` never truncates it.

use std::fmt::Display;

use crate::core::event::StoredEvent;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format a stored event as one line: id, date, category, name.
pub fn format_event(event: &StoredEvent) -> String {
    let record = &event.record;
    let mut line = format!(
        "{:>6}  {}  {:<8} {}",
        event.id.get(),
        record.date.format("%Y-%m-%d %H:%M:%S"),
        record.category,
        record.name
    );
    if let Some(description) = &record.description {
        line.push_str(&format!(" ({})", description));
    }
    line
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventRecord;
    use crate::core::types::{ComponentUuid, EventId, SnapshotId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn verbosity_quiet_wins() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn event_line() {
        let date = Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap();
        let event = StoredEvent {
            id: EventId::new(12),
            record: EventRecord {
                component_uuid: ComponentUuid::new("P").unwrap(),
                snapshot_id: SnapshotId::new(1),
                created_at: date,
                date,
                category: "Alert".to_string(),
                name: "Red (was Green)".to_string(),
                description: Some("Coverage < 80%".to_string()),
                data: None,
            },
        };
        assert_eq!(
            format_event(&event),
            "    12  2026-01-05 10:00:00  Alert    Red (was Green) (Coverage < 80%)"
        );
    }

    #[test]
    fn list_prefix() {
        assert_eq!(format_list(&["a", "b"], "- "), "- a\n- b");
    }
}
