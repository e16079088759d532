//! Aggregate figures over a record collection

use crate::core::record::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Collection statistics
///
/// Records without an `event_type` (or `status`) are left out of that
/// breakdown. Records without a `date` count as neither upcoming nor past.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub by_event_type: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub by_author: BTreeMap<String, usize>,
    /// Dated after the evaluation time
    pub upcoming: usize,
    /// Dated at or before the evaluation time
    pub past: usize,
    /// Mean `guests_count` over records that have one, rounded
    pub average_guests: i64,
}

impl Stats {
    pub fn compute(records: &[Record], now: DateTime<Utc>) -> Self {
        let mut stats = Stats {
            total: records.len(),
            ..Stats::default()
        };
        let mut guests_sum: i128 = 0;
        let mut guests_seen: i64 = 0;

        for record in records {
            if let Some(event_type) = &record.event_type {
                *stats.by_event_type.entry(event_type.clone()).or_default() += 1;
            }
            if let Some(status) = &record.status {
                *stats.by_status.entry(status.clone()).or_default() += 1;
            }
            *stats.by_author.entry(record.author.clone()).or_default() += 1;

            match record.date {
                Some(date) if date > now => stats.upcoming += 1,
                Some(_) => stats.past += 1,
                None => {}
            }

            if let Some(count) = record.guests_count {
                guests_sum += i128::from(count);
                guests_seen += 1;
            }
        }

        if guests_seen > 0 {
            stats.average_guests = (guests_sum as f64 / guests_seen as f64).round() as i64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_collection() {
        let stats = Stats::compute(&[], now());
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.average_guests, 0);
        assert!(stats.by_author.is_empty());
    }

    #[test]
    fn test_counts_and_average() {
        let records = vec![
            Record::with_id("1", "Maria", "a", now())
                .event_type("wedding")
                .status("confirmed")
                .guests(120)
                .date(now() + Duration::days(10)),
            Record::with_id("2", "Maria", "b", now())
                .event_type("wedding")
                .status("draft")
                .guests(81)
                .date(now()),
            Record::with_id("3", "Petr", "c", now()).guests(2),
        ];

        let stats = Stats::compute(&records, now());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_event_type.get("wedding"), Some(&2));
        assert_eq!(stats.by_status.get("draft"), Some(&2));
        assert_eq!(stats.by_status.get("confirmed"), Some(&1));
        assert_eq!(stats.by_author.get("Maria"), Some(&2));
        assert_eq!(stats.upcoming, 1);
        assert_eq!(stats.past, 1);
        // (120 + 81 + 2) / 3 = 67.67
        assert_eq!(stats.average_guests, 68);
    }

    #[test]
    fn test_average_of_huge_guest_counts() {
        let records = vec![
            Record::with_id("1", "Maria", "a", now()).guests(i64::MAX),
            Record::with_id("2", "Petr", "b", now()).guests(i64::MAX),
        ];

        let stats = Stats::compute(&records, now());
        assert_eq!(stats.average_guests, i64::MAX);
    }
}
