//! Structural parsing of `BLK <block> <town/road>` addresses.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize_address;

static BLK_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^BLK\s+(\S+)\s+(.+)$").expect("valid blk prefix regex"));
static HYPHEN_SPACING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("valid hyphen regex"));
static NUMERIC_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)-(\d+)").expect("valid numeric range regex"));

/// An address split into its block token and the town or road that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTown {
    pub town: String,
    pub block: String,
}

/// Consecutive block numbers served by one carpark, e.g. `781-783`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: u32,
    pub end: u32,
}

impl BlockRange {
    /// Inclusive on both ends. A reversed range contains nothing.
    #[must_use]
    pub fn contains(&self, block: u32) -> bool {
        self.start <= block && block <= self.end
    }
}

/// Splits `"BLK <block> <town/road>"` into its parts.
///
/// The address is canonicalized first, so `"Block 5 Jalan Kukoh"` parses too.
/// Returns `None` when the address does not start with the block marker or
/// nothing follows the block token.
#[must_use]
pub fn parse_block_town(address: &str) -> Option<BlockTown> {
    let canonical = normalize_address(address);
    let caps = BLK_PREFIX_RE.captures(&canonical)?;
    Some(BlockTown {
        block: caps[1].to_string(),
        town: caps[2].to_string(),
    })
}

/// Finds the first `<digits>-<digits>` pair in an address.
///
/// Spacing around the hyphen is ignored (`"781 - 783"`). Alphanumeric
/// blocks such as `"998A-998B"` are not numeric ranges and yield `None`.
#[must_use]
pub fn extract_block_range(address: &str) -> Option<BlockRange> {
    let tightened = HYPHEN_SPACING_RE.replace_all(address, "-");
    let caps = NUMERIC_RANGE_RE.captures(&tightened)?;
    let start = caps[1].parse::<u32>().ok()?;
    let end = caps[2].parse::<u32>().ok()?;
    Some(BlockRange { start, end })
}

/// Leading digits of a block token: `"998A"` → `998`.
#[must_use]
pub fn block_number(block: &str) -> Option<u32> {
    let digits: String = block
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
