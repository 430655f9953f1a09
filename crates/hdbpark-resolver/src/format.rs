//! Plain-text rendering of unified records and candidate lists.

use std::fmt::{self, Display, Formatter};

use hdbpark_core::lot_type_label;

use crate::merge::UnifiedRecord;
use crate::record::CarparkRecord;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Display for UnifiedRecord<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cp = self.carpark;
        writeln!(f, "Carpark Information for Carpark: {}", cp.identifier())?;
        writeln!(f)?;

        writeln!(f, "1. Address and Location Details:")?;
        writeln!(f, "   {}", cp.raw_address())?;
        writeln!(f)?;

        writeln!(f, "2. Parking System Information:")?;
        writeln!(
            f,
            "   Carpark Type: {} with {}",
            cp.carpark_type(),
            cp.parking_system()
        )?;
        writeln!(
            f,
            "   Carpark Basement: {}, {} carpark decks",
            if cp.has_basement() { "Yes" } else { "No" },
            cp.deck_count()
        )?;
        writeln!(f, "   Gantry Height: {:.2} m", cp.gantry_height())?;
        writeln!(f)?;

        writeln!(f, "3. Capacity and Availability:")?;
        match self.availability.filter(|lots| !lots.is_empty()) {
            Some(lots) => {
                for (code, lot) in lots {
                    writeln!(
                        f,
                        "   Lot Type {code} ({}) is {}, {} available out of {} total, last updated {}",
                        lot_type_label(code),
                        if lot.is_available { "AVAILABLE" } else { "UNAVAILABLE" },
                        lot.lots_available,
                        lot.total_lots,
                        lot.updated_at.format(TIMESTAMP_FORMAT)
                    )?;
                }
            }
            None => writeln!(
                f,
                "   No information found for carpark number: {}",
                cp.identifier()
            )?,
        }
        writeln!(f)?;

        let rules = cp.rules();
        writeln!(f, "4. Operating Hours and Rules:")?;
        writeln!(f, "   Short Term Parking: {}", rules.short_term)?;
        writeln!(f, "   Free Parking: {}", rules.free)?;
        writeln!(f, "   Night Parking: {}", rules.night)?;
        writeln!(f)?;

        let coords = cp.coordinates();
        writeln!(f, "5. Coordinates:")?;
        writeln!(f, "   X Coordinate: {}", coords.x)?;
        write!(f, "   Y Coordinate: {}", coords.y)
    }
}

/// Two-column table of candidate carparks, used when a query is ambiguous.
#[derive(Debug, Clone, Copy)]
pub struct MatchListing<'a>(pub &'a [&'a CarparkRecord]);

impl Display for MatchListing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = self
            .0
            .iter()
            .map(|r| r.identifier().len())
            .max()
            .unwrap_or(0)
            .max("CARPARK".len())
            + 2;
        write!(f, "{:<width$}ADDRESS", "CARPARK")?;
        for record in self.0 {
            write!(
                f,
                "\n{:<width$}{}",
                record.identifier(),
                record.raw_address()
            )?;
        }
        Ok(())
    }
}

/// Renders candidate records as a [`MatchListing`] table.
#[must_use]
pub fn render_matches(records: &[&CarparkRecord]) -> String {
    MatchListing(records).to_string()
}
