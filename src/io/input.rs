//! Ticket and event exports.
//!
//! Both files are JSON arrays. An object wrapping the array under `tickets`
//! or `events` is accepted too, since that is how most exporters page their
//! results.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::{Event, Ticket};
use crate::errors::{Error, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum Export<T> {
    Bare(Vec<T>),
    Tickets { tickets: Vec<T> },
    Events { events: Vec<T> },
}

impl<T> Export<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Export::Bare(records) => records,
            Export::Tickets { tickets } => tickets,
            Export::Events { events } => events,
        }
    }
}

/// Parse an export from a string
pub fn parse_export<T: DeserializeOwned>(contents: &str) -> serde_json::Result<Vec<T>> {
    serde_json::from_str::<Export<T>>(contents).map(Export::into_records)
}

fn read_export<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::input(path, format!("cannot read {what}: {e}")))?;
    let records: Vec<T> = parse_export(&contents)
        .map_err(|e| Error::input(path, format!("malformed {what} export: {e}")))?;
    log::debug!("Read {} {} from {}", records.len(), what, path.display());
    Ok(records)
}

pub fn read_tickets(path: &Path) -> Result<Vec<Ticket>> {
    let tickets: Vec<Ticket> = read_export(path, "tickets")?;
    if let Some(blank) = tickets.iter().position(|t| t.key.trim().is_empty()) {
        return Err(Error::input(path, format!("ticket at index {blank} has no key")));
    }
    Ok(tickets)
}

pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    read_export(path, "events")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn bare_and_wrapped_arrays_parse() {
        let bare: Vec<Ticket> = parse_export(r#"[{"key": "A-1"}]"#).unwrap();
        let wrapped: Vec<Ticket> = parse_export(r#"{"tickets": [{"key": "A-1"}]}"#).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn keyless_ticket_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"key": "A-1"}}, {{"summary": "orphan"}}]"#).unwrap();
        let err = read_tickets(file.path()).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn malformed_events_name_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[{{\"ticketKey\": 1}}]").unwrap();
        let err = read_events(file.path()).unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
        assert!(err.to_string().contains("malformed events export"));
    }
}
