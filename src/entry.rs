use crate::constants::TIMESTAMP_FMT;
use chrono::NaiveDateTime;
use std::cmp::Reverse;

/// One persisted guestbook submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Sequence number assigned by the store, increasing in insertion order.
    pub id: i64,
    pub name: String,
    pub message: String,
    /// Creation time, already formatted with [`TIMESTAMP_FMT`].
    pub timestamp: String,
}

/// An entry that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub message: String,
    pub timestamp: String,
}

impl Entry {
    /// Parses the stored timestamp back into a date-time, if it is well formed.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FMT).ok()
    }
}

/// Orders entries newest first by timestamp.
///
/// Entries written within the same second keep their insertion order, and
/// rows with an unreadable timestamp go last.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|entry| Reverse(entry.parsed_timestamp()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, timestamp: &str) -> Entry {
        Entry {
            id,
            name: format!("guest{id}"),
            message: "hi".to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    fn ids(entries: &[Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn parses_formatted_timestamps() {
        let parsed = entry(1, "2024-12-25 06:01:13 PM PST")
            .parsed_timestamp()
            .unwrap();
        assert_eq!(parsed.format("%H:%M:%S").to_string(), "18:01:13");
    }

    #[test]
    fn sorts_by_time_not_by_text() {
        // "01:00 PM" sorts before "11:00 AM" as text but is later in the day
        let mut entries = vec![
            entry(1, "2024-12-25 11:00:00 AM PST"),
            entry(2, "2024-12-25 01:00:00 PM PST"),
            entry(3, "2024-12-24 11:59:59 PM PST"),
        ];
        sort_newest_first(&mut entries);
        assert_eq!(ids(&entries), vec![2, 1, 3]);
    }

    #[test]
    fn same_second_keeps_insertion_order() {
        let mut entries = vec![
            entry(1, "2024-12-25 11:00:00 AM PST"),
            entry(2, "2024-12-25 11:00:00 AM PST"),
            entry(3, "2024-12-25 11:00:01 AM PST"),
        ];
        sort_newest_first(&mut entries);
        assert_eq!(ids(&entries), vec![3, 1, 2]);
    }

    #[test]
    fn unreadable_timestamps_sort_last() {
        let mut entries = vec![
            entry(1, "yesterday-ish"),
            entry(2, "2024-12-25 11:00:00 AM PST"),
        ];
        sort_newest_first(&mut entries);
        assert_eq!(ids(&entries), vec![2, 1]);
    }
}
