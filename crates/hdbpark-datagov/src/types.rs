//! Wire types for the data.gov.sg `carpark-availability` endpoint.
//!
//! The feed wraps everything in `{"items": [{"timestamp", "carpark_data"}]}`
//! and only the first item is meaningful.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub items: Vec<AvailabilityItem>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityItem {
    /// RFC 3339 timestamp of the snapshot, e.g. `"2025-03-08T18:53:40+08:00"`.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub carpark_data: Vec<CarparkEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CarparkEntry {
    pub carpark_number: String,
    /// Local time without offset, e.g. `"2025-03-08T18:53:12"`.
    pub update_datetime: String,
    #[serde(default)]
    pub carpark_info: Vec<LotInfo>,
}

#[derive(Debug, Deserialize)]
pub struct LotInfo {
    pub lot_type: String,
    pub total_lots: LotCount,
    pub lots_available: LotCount,
}

/// Lot counts arrive as strings (`"105"`), but plain numbers are accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LotCount {
    Number(i64),
    Text(String),
}

impl LotCount {
    /// Parses the count, rejecting negatives and non-numeric text.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        match self {
            LotCount::Number(n) => u32::try_from(*n).ok(),
            LotCount::Text(s) => s.trim().parse::<u32>().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_count_accepts_strings_and_numbers() {
        let text: LotCount = serde_json::from_str("\"105\"").unwrap();
        let number: LotCount = serde_json::from_str("42").unwrap();
        assert_eq!(text.value(), Some(105));
        assert_eq!(number.value(), Some(42));
    }

    #[test]
    fn lot_count_rejects_garbage() {
        let negative: LotCount = serde_json::from_str("-3").unwrap();
        let junk: LotCount = serde_json::from_str("\"n/a\"").unwrap();
        assert_eq!(negative.value(), None);
        assert_eq!(junk.value(), None);
    }

    #[test]
    fn missing_items_defaults_to_empty() {
        let resp: AvailabilityResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.items.is_empty());
    }
}
