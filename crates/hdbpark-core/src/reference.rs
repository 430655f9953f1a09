use serde::{Deserialize, Serialize};

/// One row of the HDB carpark information dataset, exactly as published.
///
/// Column names follow the CSV header; no address cleanup happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub car_park_no: String,
    pub address: String,
    pub x_coord: f64,
    pub y_coord: f64,
    pub car_park_type: String,
    pub type_of_parking_system: String,
    pub short_term_parking: String,
    pub free_parking: String,
    pub night_parking: String,
    pub car_park_decks: u32,
    pub gantry_height: f64,
    /// `"Y"` or `"N"`.
    pub car_park_basement: String,
}

impl ReferenceRow {
    #[must_use]
    pub fn has_basement(&self) -> bool {
        self.car_park_basement.trim().eq_ignore_ascii_case("Y")
    }
}
