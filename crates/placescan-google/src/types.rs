//! Response shapes of the Places web service (`/maps/api/place/...`).
//!
//! Only the fields the pipeline reads are modeled; serde ignores the rest.
//!
//! ### `status`
//! Every response carries a top-level `status`. `OK` and `ZERO_RESULTS` are
//! success; anything else comes with an optional `error_message`.
//!
//! ### `next_page_token`
//! Present on nearby-search pages that have a successor. The token only
//! becomes valid a couple of seconds after it is issued, and Google stops
//! handing them out after the third page (60 results).
//!
//! ### Phone numbers
//! `formatted_phone_number` is the local format (`0271 123456`),
//! `international_phone_number` the E.164-ish form (`+49 271 123456`).
//! Either may be missing.

use serde::Deserialize;

/// `GET /maps/api/place/nearbysearch/json`
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyResult {
    pub place_id: String,
    pub name: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// `GET /maps/api/place/details/json`
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetailsResult>,
    pub error_message: Option<String>,
}

/// Field-masked detail record; absent fields deserialize to `None`.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetailsResult {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
}
