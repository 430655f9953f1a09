//! Candidate selection over the reference table.
//!
//! Both entry points return every qualifying record in reference order;
//! no ranking is applied, and disambiguation is left to the caller.

use regex::Regex;

use crate::error::QueryError;
use crate::normalize::{compact_address, normalize_address, search_key};
use crate::parse::{block_number, extract_block_range};
use crate::record::CarparkRecord;

/// Block answers that mean "no block given".
const UNKNOWN_BLOCK_ANSWERS: &[&str] = &["NOT SURE", "UNSURE", "UNKNOWN"];

/// Why a well-formed query matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    NoAddressMatch,
    TownNotFound,
    InvalidBlock,
}

impl Miss {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Miss::NoAddressMatch => {
                "No matches found. Check the spelling and the BLK <number> <road> convention, or search by town and block instead"
            }
            Miss::TownNotFound => "Town or road name does not exist, check the spelling",
            Miss::InvalidBlock => "Invalid block number, restart search",
        }
    }
}

impl std::fmt::Display for Miss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a match: at least one record, or the reason there are none.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'a> {
    Found(Vec<&'a CarparkRecord>),
    Missing(Miss),
}

impl<'a> MatchResult<'a> {
    /// Wraps `records`, tagging an empty list with `miss`.
    #[must_use]
    pub fn from_records(records: Vec<&'a CarparkRecord>, miss: Miss) -> Self {
        if records.is_empty() {
            MatchResult::Missing(miss)
        } else {
            MatchResult::Found(records)
        }
    }

    #[must_use]
    pub fn records(&self) -> &[&'a CarparkRecord] {
        match self {
            MatchResult::Found(records) => records,
            MatchResult::Missing(_) => &[],
        }
    }

    #[must_use]
    pub fn miss(&self) -> Option<Miss> {
        match self {
            MatchResult::Found(_) => None,
            MatchResult::Missing(miss) => Some(*miss),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, MatchResult::Missing(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records().len()
    }

    #[must_use]
    pub fn identifiers(&self) -> Vec<&'a str> {
        self.records()
            .iter()
            .copied()
            .map(CarparkRecord::identifier)
            .collect()
    }
}

/// Returns every record whose address contains the query, ignoring case and
/// whitespace.
///
/// Matching is by substring so partial addresses and unit suffixes still
/// hit. Keys are compared both as written and with suffixed ranges folded,
/// so `"514A"` and `"BLK 514-519A"` both find `"BLK 514A-519A ..."`. An
/// empty query is a substring of everything and returns all records.
#[must_use]
pub fn match_by_address<'a>(records: &'a [CarparkRecord], query: &str) -> MatchResult<'a> {
    let compact = compact_address(query);
    let folded = search_key(query);
    let found = records
        .iter()
        .filter(|r| r.compact_key().contains(&compact) || r.search_key().contains(&folded))
        .collect();
    MatchResult::from_records(found, Miss::NoAddressMatch)
}

/// Filters by town (or road) and then, optionally, by block.
///
/// The town must appear in the canonical address. A block matches when it
/// appears there as a whole word, or when its leading number falls inside
/// the address's block range (`"782"` matches `"BLK 781-783 ..."`). A
/// missing, blank, or `NOT SURE` block skips the block filter.
///
/// # Errors
///
/// Returns [`QueryError::EmptyTown`] when `town` is blank.
pub fn match_by_town_block<'a>(
    records: &'a [CarparkRecord],
    town: &str,
    block: Option<&str>,
) -> Result<MatchResult<'a>, QueryError> {
    let town = normalize_address(town);
    if town.is_empty() {
        return Err(QueryError::EmptyTown);
    }

    let in_town: Vec<&CarparkRecord> = records
        .iter()
        .filter(|r| r.address().contains(&town))
        .collect();
    if in_town.is_empty() {
        tracing::debug!(town = %town, "no carparks in town");
        return Ok(MatchResult::Missing(Miss::TownNotFound));
    }

    let Some(block) = known_block(block) else {
        return Ok(MatchResult::Found(in_town));
    };

    let predicate = BlockPredicate::new(&block);
    let found: Vec<&CarparkRecord> = in_town
        .into_iter()
        .filter(|r| predicate.matches(r.address()))
        .collect();
    if found.is_empty() {
        tracing::debug!(town = %town, block = %block, "no carparks for block");
    }
    Ok(MatchResult::from_records(found, Miss::InvalidBlock))
}

/// Normalizes a block answer, mapping blanks and "don't know" answers to `None`.
fn known_block(block: Option<&str>) -> Option<String> {
    let block = block?.trim().to_uppercase();
    if block.is_empty() || UNKNOWN_BLOCK_ANSWERS.contains(&block.as_str()) {
        None
    } else {
        Some(block)
    }
}

/// Compiled form of a block query, built once per search.
struct BlockPredicate {
    word: Option<Regex>,
    number: Option<u32>,
}

impl BlockPredicate {
    fn new(block: &str) -> Self {
        let word = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(block))).ok();
        Self {
            word,
            number: block_number(block),
        }
    }

    fn matches(&self, address: &str) -> bool {
        if self.word.as_ref().is_some_and(|re| re.is_match(address)) {
            return true;
        }
        match (extract_block_range(address), self.number) {
            (Some(range), Some(n)) => range.contains(n),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::record;

    fn reference() -> Vec<CarparkRecord> {
        vec![
            record("A20", "BLK 101 TAMPINES STREET 1"),
            record("B12", "BLK 202 ANG MO KIO"),
            record("AM14", "BLK 781 TO 783 ANG MO KIO AVE 5"),
            record("AM22", "BLK 998A ANG MO KIO AVE 3"),
            record("T55", "BLK 1010 TAMPINES STREET 10"),
        ]
    }

    #[test]
    fn match_by_address_ignores_spacing() {
        let records = reference();
        let result = match_by_address(&records, "BLK101TAMPINESSTREET1");
        assert_eq!(result.identifiers(), vec!["A20"]);
    }

    #[test]
    fn match_by_address_is_case_insensitive_and_partial() {
        let records = reference();
        let result = match_by_address(&records, "ang mo kio ave");
        assert_eq!(result.identifiers(), vec!["AM14", "AM22"]);
    }

    #[test]
    fn match_by_address_normalizes_to_ranges() {
        let records = reference();
        let result = match_by_address(&records, "BLK 781 TO 783 ANG MO KIO");
        assert_eq!(result.identifiers(), vec!["AM14"]);
    }

    #[test]
    fn match_by_address_finds_first_block_of_suffixed_range() {
        let records = vec![record("Y51", "BLK 514A-519A YISHUN ST 51")];
        for query in ["514A", "BLK 514A", "519A YISHUN", "BLK 514A TO 519A", "BLK 514-519A"] {
            assert_eq!(
                match_by_address(&records, query).identifiers(),
                vec!["Y51"],
                "query: {query:?}"
            );
        }
    }

    #[test]
    fn match_by_address_empty_query_returns_everything() {
        let records = reference();
        assert_eq!(match_by_address(&records, "").len(), records.len());
    }

    #[test]
    fn match_by_address_no_match_is_tagged() {
        let records = reference();
        let result = match_by_address(&records, "BLK 9 NOWHERE ROAD");
        assert!(result.is_empty());
        assert_eq!(result.miss(), Some(Miss::NoAddressMatch));
    }

    #[test]
    fn match_by_town_block_requires_town() {
        let records = reference();
        assert_eq!(
            match_by_town_block(&records, "", Some("101")),
            Err(QueryError::EmptyTown)
        );
        assert_eq!(
            match_by_town_block(&records, "   ", None),
            Err(QueryError::EmptyTown)
        );
    }

    #[test]
    fn match_by_town_block_unknown_town() {
        let records = reference();
        let result = match_by_town_block(&records, "NONEXISTENT_TOWN", None).unwrap();
        assert_eq!(result.miss(), Some(Miss::TownNotFound));
    }

    #[test]
    fn match_by_town_block_without_block_returns_whole_town() {
        let records = reference();
        let result = match_by_town_block(&records, "ang mo kio", None).unwrap();
        assert_eq!(result.identifiers(), vec!["B12", "AM14", "AM22"]);
    }

    #[test]
    fn match_by_town_block_not_sure_means_no_block() {
        let records = reference();
        let result = match_by_town_block(&records, "TAMPINES", Some("not sure")).unwrap();
        assert_eq!(result.identifiers(), vec!["A20", "T55"]);
        let blank = match_by_town_block(&records, "TAMPINES", Some("  ")).unwrap();
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn match_by_town_block_whole_word_block() {
        let records = reference();
        let result = match_by_town_block(&records, "TAMPINES", Some("101")).unwrap();
        assert_eq!(result.identifiers(), vec!["A20"]);
    }

    #[test]
    fn match_by_town_block_range_inclusion() {
        let records = reference();
        let result = match_by_town_block(&records, "ANG MO KIO", Some("782")).unwrap();
        assert_eq!(result.identifiers(), vec!["AM14"]);
    }

    #[test]
    fn match_by_town_block_alphanumeric_block() {
        let records = reference();
        let result = match_by_town_block(&records, "ANG MO KIO", Some("998a")).unwrap();
        assert_eq!(result.identifiers(), vec!["AM22"]);
    }

    #[test]
    fn match_by_town_block_invalid_block_is_distinct_from_unknown_town() {
        let records = reference();
        let result = match_by_town_block(&records, "ANG MO KIO", Some("5000")).unwrap();
        assert_eq!(result.miss(), Some(Miss::InvalidBlock));
        assert_ne!(result.miss(), Some(Miss::TownNotFound));
    }

    #[test]
    fn match_by_town_block_escapes_block_text() {
        let records = reference();
        let result = match_by_town_block(&records, "TAMPINES", Some("1(")).unwrap();
        assert_eq!(result.miss(), Some(Miss::InvalidBlock));
    }

    #[test]
    fn miss_messages_are_distinct() {
        assert_ne!(Miss::TownNotFound.message(), Miss::InvalidBlock.message());
        assert_ne!(Miss::NoAddressMatch.message(), Miss::InvalidBlock.message());
        assert!(Miss::InvalidBlock.to_string().contains("Invalid block number"));
    }
}
