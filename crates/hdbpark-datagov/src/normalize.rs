//! Conversion of the raw availability feed into an [`AvailabilitySnapshot`].

use chrono::{DateTime, NaiveDateTime};
use hdbpark_core::{AvailabilitySnapshot, LotAvailability};

use crate::error::FeedError;
use crate::types::{AvailabilityResponse, CarparkEntry};

/// Parses a feed `update_datetime`.
///
/// The feed sends local time without an offset; an RFC 3339 value is
/// accepted as well and reduced to its local wall-clock time.
#[must_use]
pub fn parse_update_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

/// Builds a snapshot from the first item of the feed response.
///
/// Entries with an unparseable timestamp, and lot rows with unparseable
/// counts, are skipped and logged rather than failing the whole fetch.
///
/// # Errors
///
/// Returns [`FeedError::EmptyPayload`] when the response carries no items.
pub fn normalize_availability(
    response: AvailabilityResponse,
    source_url: &str,
) -> Result<AvailabilitySnapshot, FeedError> {
    let Some(item) = response.items.into_iter().next() else {
        return Err(FeedError::EmptyPayload {
            url: source_url.to_string(),
        });
    };

    let fetched_at = item
        .timestamp
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok());

    let mut snapshot = AvailabilitySnapshot::new(fetched_at);
    let mut skipped = 0usize;
    for entry in &item.carpark_data {
        skipped += insert_entry(&mut snapshot, entry);
    }

    if skipped > 0 {
        tracing::warn!(count = skipped, "skipped malformed availability rows");
    }
    tracing::debug!(carparks = snapshot.len(), "availability snapshot built");

    Ok(snapshot)
}

/// Adds every well-formed lot row of `entry`, returning how many were dropped.
fn insert_entry(snapshot: &mut AvailabilitySnapshot, entry: &CarparkEntry) -> usize {
    let Some(updated_at) = parse_update_datetime(&entry.update_datetime) else {
        tracing::debug!(
            carpark = %entry.carpark_number,
            value = %entry.update_datetime,
            "unparseable update_datetime"
        );
        return entry.carpark_info.len().max(1);
    };

    let mut skipped = 0;
    for info in &entry.carpark_info {
        match (info.total_lots.value(), info.lots_available.value()) {
            (Some(total), Some(available)) => snapshot.insert_lot(
                &entry.carpark_number,
                &info.lot_type,
                LotAvailability::new(total, available, updated_at),
            ),
            _ => {
                tracing::debug!(
                    carpark = %entry.carpark_number,
                    lot_type = %info.lot_type,
                    "unparseable lot counts"
                );
                skipped += 1;
            }
        }
    }
    skipped
}
