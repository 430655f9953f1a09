//! Address resolution for HDB carparks.
//!
//! Free-text addresses are canonicalized ([`normalize`]), decomposed into
//! block and town ([`parse`]), matched against an indexed reference table
//! ([`index`], [`matcher`]), joined with live availability ([`merge`]) and
//! rendered for display ([`format`]). Nothing in this crate performs I/O.

pub mod error;
pub mod format;
pub mod index;
pub mod matcher;
pub mod merge;
pub mod normalize;
pub mod parse;
pub mod record;

pub use error::{IndexError, QueryError};
pub use format::{render_matches, MatchListing};
pub use index::{AddressQuery, CarparkIndex};
pub use matcher::{match_by_address, match_by_town_block, MatchResult, Miss};
pub use merge::{merge, UnifiedRecord};
pub use normalize::{compact_address, normalize_address, search_key};
pub use parse::{extract_block_range, parse_block_town, BlockRange, BlockTown};
pub use record::CarparkRecord;
