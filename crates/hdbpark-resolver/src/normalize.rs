//! Canonical forms of free-text HDB addresses.
//!
//! [`normalize_address`] produces the display-safe canonical address stored
//! on every [`crate::CarparkRecord`]. [`compact_address`] drops its whitespace
//! and [`search_key`] additionally folds suffixed ranges; both are used for
//! substring matching. All three are idempotent.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static COMMA_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s+").expect("valid comma regex"));
static BLOCK_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:BLOCK|BLKS)\b").expect("valid block regex"));
static RANGE_TO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)\s+TO\s+(\w)").expect("valid range regex"));
static AMPERSAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*&\s*").expect("valid ampersand regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static SUFFIXED_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)[A-Z]+-(\d+)([A-Z]+)").expect("valid suffixed range regex")
});

/// Canonicalizes an address for comparison and storage.
///
/// In order:
/// 1. trim and upper-case;
/// 2. `", "` collapses to a single space;
/// 3. `BLOCK` / `BLKS` become `BLK`;
/// 4. `X TO Y` between word characters becomes `X-Y` (`"781 TO 783"` → `"781-783"`,
///    `"998A TO 998B"` → `"998A-998B"`);
/// 5. `&` between blocks becomes `,` (`"123 & 124"` → `"123,124"`);
/// 6. whitespace runs collapse to one space.
///
/// Addresses without a block marker only go through the remaining rules.
#[must_use]
pub fn normalize_address(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let s = replace_until_stable(&COMMA_SPACE_RE, upper, " ");
    let s = BLOCK_WORD_RE.replace_all(&s, "BLK");
    let s = replace_until_stable(&RANGE_TO_RE, s.into_owned(), "${1}-${2}");
    let s = AMPERSAND_RE.replace_all(&s, ",");
    WHITESPACE_RE.replace_all(&s, " ").trim().to_string()
}

/// The canonical address with all whitespace removed, so that
/// `"BLK 101 TAMPINES STREET 1"` and `"BLK101TAMPINESSTREET1"` compare equal.
#[must_use]
pub fn compact_address(raw: &str) -> String {
    normalize_address(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// [`compact_address`] with suffixed ranges folded: the first block of the
/// range drops its suffix (`"514A-519A"` → `"514-519A"`).
///
/// Folding loses the first block's suffix, so a partial address naming that
/// block only matches the unfolded form; matching checks both.
#[must_use]
pub fn search_key(raw: &str) -> String {
    replace_until_stable(&SUFFIXED_RANGE_RE, compact_address(raw), "${1}-${2}${3}")
}

/// Applies `re` repeatedly until nothing matches.
///
/// A single `replace_all` leaves chains such as `"1 TO 2 TO 3"` half done
/// because matches consume their boundary characters. Every rewrite here
/// shortens the string, so the loop terminates.
fn replace_until_stable(re: &Regex, mut s: String, replacement: &str) -> String {
    loop {
        match re.replace_all(&s, replacement) {
            Cow::Borrowed(_) => return s,
            Cow::Owned(next) => s = next,
        }
    }
}
