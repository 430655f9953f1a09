use hdbpark_core::{AvailabilitySnapshot, CarparkAvailability};

use crate::record::CarparkRecord;

/// A reference carpark joined with its live availability, ready for display.
///
/// Borrows from both the reference table and the snapshot, so building one
/// never copies or mutates either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnifiedRecord<'a> {
    pub carpark: &'a CarparkRecord,
    /// `None` when the snapshot has no entry for this carpark.
    pub availability: Option<&'a CarparkAvailability>,
}

impl UnifiedRecord<'_> {
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.carpark.identifier()
    }

    #[must_use]
    pub fn has_live_data(&self) -> bool {
        self.availability.is_some_and(|lots| !lots.is_empty())
    }
}

/// Joins `record` with the snapshot entry sharing its carpark number.
///
/// A carpark missing from the feed is not an error: the result simply
/// carries no availability.
#[must_use]
pub fn merge<'a>(record: &'a CarparkRecord, snapshot: &'a AvailabilitySnapshot) -> UnifiedRecord<'a> {
    let availability = snapshot.get(record.identifier());
    if availability.is_none() {
        tracing::debug!(carpark = %record.identifier(), "no live availability for carpark");
    }
    UnifiedRecord {
        carpark: record,
        availability,
    }
}
