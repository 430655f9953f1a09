use hdbpark_core::ReferenceRow;

use crate::normalize::{compact_address, normalize_address, search_key};

/// Operating-hour rules as published, e.g. `"WHOLE DAY"` or `"7AM-10.30PM"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingRules {
    pub short_term: String,
    pub free: String,
    pub night: String,
}

/// SVY21 easting/northing of the carpark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// A reference carpark with its address pre-normalized for matching.
///
/// The canonical address and matching keys are derived once, from the raw
/// address, when the record is built; fields are read-only afterwards so
/// they can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct CarparkRecord {
    identifier: String,
    raw_address: String,
    address: String,
    compact_key: String,
    search_key: String,
    carpark_type: String,
    parking_system: String,
    deck_count: u32,
    gantry_height: f64,
    basement: bool,
    rules: ParkingRules,
    coordinates: Coordinates,
}

impl CarparkRecord {
    #[must_use]
    pub fn from_row(row: ReferenceRow) -> Self {
        let basement = row.has_basement();
        let address = normalize_address(&row.address);
        let compact_key = compact_address(&row.address);
        let search_key = search_key(&row.address);
        Self {
            identifier: row.car_park_no.trim().to_string(),
            raw_address: row.address,
            address,
            compact_key,
            search_key,
            carpark_type: row.car_park_type,
            parking_system: row.type_of_parking_system,
            deck_count: row.car_park_decks,
            gantry_height: row.gantry_height,
            basement,
            rules: ParkingRules {
                short_term: row.short_term_parking,
                free: row.free_parking,
                night: row.night_parking,
            },
            coordinates: Coordinates {
                x: row.x_coord,
                y: row.y_coord,
            },
        }
    }

    /// Carpark number, the join key with the availability feed.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Address exactly as published, for display.
    #[must_use]
    pub fn raw_address(&self) -> &str {
        &self.raw_address
    }

    /// Canonical address, see [`normalize_address`].
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whitespace-free address with range suffixes intact, see [`compact_address`].
    #[must_use]
    pub fn compact_key(&self) -> &str {
        &self.compact_key
    }

    /// Whitespace-free address with suffixed ranges folded, see [`search_key`].
    #[must_use]
    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    /// `true` when normalization changed more than case and spacing.
    #[must_use]
    pub fn address_was_rewritten(&self) -> bool {
        let plain = self
            .raw_address
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        plain != self.address
    }

    #[must_use]
    pub fn carpark_type(&self) -> &str {
        &self.carpark_type
    }

    #[must_use]
    pub fn parking_system(&self) -> &str {
        &self.parking_system
    }

    #[must_use]
    pub fn deck_count(&self) -> u32 {
        self.deck_count
    }

    /// Gantry clearance in metres; `0.0` means no gantry.
    #[must_use]
    pub fn gantry_height(&self) -> f64 {
        self.gantry_height
    }

    #[must_use]
    pub fn has_basement(&self) -> bool {
        self.basement
    }

    #[must_use]
    pub fn rules(&self) -> &ParkingRules {
        &self.rules
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}
