//! The in-memory reference table and its query operations.

use std::collections::HashMap;

use hdbpark_core::{AvailabilitySnapshot, ReferenceRow};

use crate::error::{IndexError, QueryError};
use crate::matcher::{match_by_address, match_by_town_block, MatchResult, Miss};
use crate::merge::{merge, UnifiedRecord};
use crate::parse::parse_block_town;
use crate::record::CarparkRecord;

/// A location search, either one free-text address or a town with an
/// optional block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressQuery {
    Full(String),
    TownBlock { town: String, block: Option<String> },
}

impl AddressQuery {
    #[must_use]
    pub fn full(address: impl Into<String>) -> Self {
        AddressQuery::Full(address.into())
    }

    #[must_use]
    pub fn town_block(town: impl Into<String>, block: Option<impl Into<String>>) -> Self {
        AddressQuery::TownBlock {
            town: town.into(),
            block: block.map(Into::into),
        }
    }
}

/// Reference carparks in source order, indexed by carpark number.
///
/// Built once at startup and read-only afterwards. Live availability is
/// never stored here; each lookup takes the snapshot it should join against.
#[derive(Debug, Clone, Default)]
pub struct CarparkIndex {
    records: Vec<CarparkRecord>,
    by_id: HashMap<String, usize>,
}

impl CarparkIndex {
    /// Normalizes every row and indexes it by carpark number.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::EmptyIdentifier`] for a row with a blank carpark
    /// number (rows are counted from 1) and [`IndexError::DuplicateIdentifier`]
    /// when a carpark number appears twice.
    pub fn build(rows: Vec<ReferenceRow>) -> Result<Self, IndexError> {
        let mut records = Vec::with_capacity(rows.len());
        let mut by_id = HashMap::with_capacity(rows.len());

        for (i, row) in rows.into_iter().enumerate() {
            let record = CarparkRecord::from_row(row);
            if record.identifier().is_empty() {
                return Err(IndexError::EmptyIdentifier { row: i + 1 });
            }
            if by_id
                .insert(record.identifier().to_string(), records.len())
                .is_some()
            {
                return Err(IndexError::DuplicateIdentifier(
                    record.identifier().to_string(),
                ));
            }
            records.push(record);
        }

        let rewritten = records.iter().filter(|r| r.address_was_rewritten()).count();
        tracing::info!(
            carparks = records.len(),
            rewritten,
            "indexed reference carparks; addresses with naming conventions changed"
        );

        Ok(Self { records, by_id })
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&CarparkRecord> {
        self.by_id.get(identifier).map(|&i| &self.records[i])
    }

    #[must_use]
    pub fn records(&self) -> &[CarparkRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds a carpark by number and joins it with `snapshot`.
    ///
    /// Lookup is exact first, then case-insensitive. `Ok(None)` means the
    /// number is not in the reference table; a carpark that exists but is
    /// absent from the feed is returned with no availability.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyIdentifier`] when `identifier` is blank.
    pub fn lookup_by_identifier<'a>(
        &'a self,
        identifier: &str,
        snapshot: &'a AvailabilitySnapshot,
    ) -> Result<Option<UnifiedRecord<'a>>, QueryError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(QueryError::EmptyIdentifier);
        }
        let record = self
            .get(identifier)
            .or_else(|| self.get(&identifier.to_uppercase()));
        Ok(record.map(|r| merge(r, snapshot)))
    }

    /// Runs `query` through [`Self::lookup_by_address`] or
    /// [`Self::lookup_by_town_block`].
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyAddress`] or [`QueryError::EmptyTown`] when
    /// the mandatory field of the query is blank.
    pub fn lookup(&self, query: &AddressQuery) -> Result<MatchResult<'_>, QueryError> {
        match query {
            AddressQuery::Full(address) => self.lookup_by_address(address),
            AddressQuery::TownBlock { town, block } => {
                self.lookup_by_town_block(town, block.as_deref())
            }
        }
    }

    /// Resolves a free-text address.
    ///
    /// Tries a substring match on the search key first. If that finds nothing
    /// and the address decomposes as `BLK <block> <town>`, retries as a
    /// town-and-block query and reports that query's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyAddress`] when `address` is blank.
    pub fn lookup_by_address(&self, address: &str) -> Result<MatchResult<'_>, QueryError> {
        if address.trim().is_empty() {
            return Err(QueryError::EmptyAddress);
        }
        let direct = match_by_address(&self.records, address);
        if !direct.is_empty() {
            return Ok(direct);
        }
        match parse_block_town(address) {
            Some(parsed) => {
                tracing::debug!(
                    town = %parsed.town,
                    block = %parsed.block,
                    "address substring missed; retrying as town and block"
                );
                match_by_town_block(&self.records, &parsed.town, Some(parsed.block.as_str()))
            }
            None => Ok(MatchResult::Missing(Miss::NoAddressMatch)),
        }
    }

    /// See [`match_by_town_block`].
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyTown`] when `town` is blank.
    pub fn lookup_by_town_block(
        &self,
        town: &str,
        block: Option<&str>,
    ) -> Result<MatchResult<'_>, QueryError> {
        match_by_town_block(&self.records, town, block)
    }
}
