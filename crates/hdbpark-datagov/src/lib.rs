//! Data sources for the carpark lookup: the data.gov.sg live availability
//! feed and the HDB carpark information CSV.

pub mod client;
pub mod error;
pub mod normalize;
pub mod reference;
pub mod types;

pub use client::AvailabilityClient;
pub use error::FeedError;
pub use normalize::normalize_availability;
pub use reference::{load_reference_csv, parse_reference_csv};
