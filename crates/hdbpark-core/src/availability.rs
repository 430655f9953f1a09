//! Live carpark availability, keyed by carpark number.
//!
//! A snapshot is built once per fetch and replaced wholesale on the next one;
//! nothing here supports incremental updates.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Occupancy of one lot type (cars, motorcycles, ...) in one carpark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotAvailability {
    pub is_available: bool,
    pub total_lots: u32,
    pub lots_available: u32,
    pub updated_at: NaiveDateTime,
}

impl LotAvailability {
    #[must_use]
    pub fn new(total_lots: u32, lots_available: u32, updated_at: NaiveDateTime) -> Self {
        Self {
            is_available: lots_available > 0,
            total_lots,
            lots_available,
            updated_at,
        }
    }
}

/// Per-lot-type availability of a single carpark, ordered by lot-type code.
pub type CarparkAvailability = BTreeMap<String, LotAvailability>;

/// Human-readable name for a feed lot-type code.
///
/// Unknown codes are returned unchanged.
#[must_use]
pub fn lot_type_label(code: &str) -> &str {
    match code {
        "C" => "car",
        "H" => "heavy vehicle",
        "Y" => "motorcycle",
        "L" => "loading bay",
        other => other,
    }
}

/// The most recently fetched availability feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySnapshot {
    /// Feed-level timestamp, when the source provided a parseable one.
    pub fetched_at: Option<DateTime<FixedOffset>>,
    carparks: HashMap<String, CarparkAvailability>,
}

impl AvailabilitySnapshot {
    #[must_use]
    pub fn new(fetched_at: Option<DateTime<FixedOffset>>) -> Self {
        Self {
            fetched_at,
            carparks: HashMap::new(),
        }
    }

    /// Records one lot type for a carpark. A later entry for the same
    /// carpark and lot type replaces the earlier one.
    pub fn insert_lot(&mut self, carpark_no: &str, lot_type: &str, lot: LotAvailability) {
        self.carparks
            .entry(carpark_no.to_string())
            .or_default()
            .insert(lot_type.to_string(), lot);
    }

    #[must_use]
    pub fn get(&self, carpark_no: &str) -> Option<&CarparkAvailability> {
        self.carparks.get(carpark_no)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.carparks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carparks.is_empty()
    }

    /// Latest `update_datetime` for one carpark, or across the whole feed
    /// when `carpark_no` is `None`.
    ///
    /// Returns `None` when the carpark is absent or the snapshot is empty.
    #[must_use]
    pub fn last_updated(&self, carpark_no: Option<&str>) -> Option<NaiveDateTime> {
        match carpark_no {
            Some(id) => self
                .carparks
                .get(id)
                .and_then(|lots| lots.values().map(|l| l.updated_at).max()),
            None => self
                .carparks
                .values()
                .flat_map(|lots| lots.values().map(|l| l.updated_at))
                .max(),
        }
    }
}
