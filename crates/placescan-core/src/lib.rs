//! Domain types, geometry, address heuristics and configuration shared by the
//! placescan crates.
//!
//! Nothing in here performs I/O except [`load_app_config`], which reads the
//! process environment (after loading a `.env` file if present).

pub mod address;
mod app_config;
mod config;
pub mod dedup;
mod error;
pub mod geo;
pub mod keywords;
pub mod record;

pub use address::{AddressParser, AddressParts, GermanAddressParser};
pub use app_config::{AppConfig, Environment, SearchConfig};
pub use config::{load_app_config, load_app_config_from_env, load_search_config};
pub use dedup::SeenSet;
pub use error::{ConfigError, CoreError};
pub use geo::{haversine_m, GeoPoint, SearchCenter, EARTH_RADIUS_M};
pub use keywords::{expand_queries, Keyword};
pub use record::{PlaceCandidate, PlaceDetail, ResultRecord};
