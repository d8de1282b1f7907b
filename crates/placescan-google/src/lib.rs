//! Client for the Google Maps Places web service (nearby search and place
//! details), returning `placescan-core` domain types.

pub mod client;
pub mod details;
pub mod error;
pub mod pagination;
pub mod types;

pub use client::{NearbyPage, PlacesClient};
pub use details::{normalize_details, resolve_phone};
pub use error::PlacesError;
pub use pagination::{NearbyPager, PaginationOptions, DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY_MS};
