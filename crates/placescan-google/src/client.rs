//! HTTP client for the Google Maps Places web service.
//!
//! Wraps `reqwest` with API key handling, typed response deserialization and
//! envelope status checks. Non-success statuses surface as
//! [`PlacesError::Api`]. Nothing is retried.

use std::time::Duration;

use placescan_core::{GeoPoint, Keyword, PlaceCandidate, PlaceDetail, SearchCenter};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::details::normalize_details;
use crate::error::PlacesError;
use crate::types::{DetailsResponse, NearbySearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";
const DETAILS_PATH: &str = "maps/api/place/details/json";

/// Detail fields requested for every place. `website` is appended on demand.
const DETAIL_FIELDS: &[&str] = &[
    "name",
    "formatted_address",
    "formatted_phone_number",
    "international_phone_number",
];

/// One page of nearby-search results.
#[derive(Debug, Clone, Default)]
pub struct NearbyPage {
    pub candidates: Vec<PlaceCandidate>,
    pub next_page_token: Option<String>,
}

/// Client for the Places web service.
///
/// One instance is built per run and handed to whatever needs it. Use
/// [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    nearby_url: Url,
    details_url: Url,
}

impl PlacesClient {
    /// Creates a client pointed at `maps.googleapis.com`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let nearby_url = base
            .join(NEARBY_SEARCH_PATH)
            .map_err(|e| invalid(e.to_string()))?;
        let details_url = base.join(DETAILS_PATH).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            nearby_url,
            details_url,
        })
    }

    /// Runs one nearby-search request around `center` for `keyword`.
    ///
    /// Pass the previous page's `next_page_token` to fetch a continuation
    /// page. `ZERO_RESULTS` yields an empty page.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the envelope status is not `OK`/`ZERO_RESULTS`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_search(
        &self,
        center: &SearchCenter,
        keyword: &Keyword,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError> {
        let point = center.point();
        let location = format!("{},{}", point.lat, point.lng);
        let radius = center.radius_m().to_string();

        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("keyword", keyword.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        tracing::debug!(
            keyword = %keyword,
            continuation = page_token.is_some(),
            "nearby search request"
        );

        let url = self.build_url(&self.nearby_url, &params);
        let response: NearbySearchResponse = self
            .request_json(url, || format!("nearbysearch(keyword={keyword})"))
            .await?;
        check_status(&response.status, response.error_message.as_deref())?;

        let candidates = response
            .results
            .into_iter()
            .map(|r| PlaceCandidate {
                place_id: r.place_id,
                location: GeoPoint::new(r.geometry.location.lat, r.geometry.location.lng),
                name: r.name,
            })
            .collect();

        Ok(NearbyPage {
            candidates,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    /// Fetches name, address and phone numbers (and the website when
    /// `include_website` is set) for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the envelope status is not `OK`, or an `OK`
    ///   envelope has no `result`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn place_details(
        &self,
        place_id: &str,
        include_website: bool,
    ) -> Result<PlaceDetail, PlacesError> {
        let fields = detail_fields(include_website);
        let url = self.build_url(
            &self.details_url,
            &[("place_id", place_id), ("fields", fields.as_str())],
        );

        let response: DetailsResponse = self
            .request_json(url, || format!("details(place_id={place_id})"))
            .await?;
        check_status(&response.status, response.error_message.as_deref())?;

        let result = response.result.ok_or_else(|| PlacesError::Api {
            status: response.status.clone(),
            message: format!("details response for {place_id} has no result"),
        })?;

        Ok(normalize_details(result, include_website))
    }

    /// Appends `key` and the extra parameters to `endpoint`, percent-encoded.
    fn build_url(&self, endpoint: &Url, extra: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET, asserts a 2xx status and deserializes the body.
    ///
    /// URLs are stripped from transport errors because they carry the key.
    async fn request_json<T, C>(&self, url: Url, context: C) -> Result<T, PlacesError>
    where
        T: DeserializeOwned,
        C: FnOnce() -> String,
    {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        let response = response
            .error_for_status()
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context(),
            source: e,
        })
    }
}

/// Comma-joined `fields` parameter for a details request.
fn detail_fields(include_website: bool) -> String {
    let mut fields = DETAIL_FIELDS.to_vec();
    if include_website {
        fields.push("website");
    }
    fields.join(",")
}

/// Maps a non-success envelope status to [`PlacesError::Api`].
fn check_status(status: &str, error_message: Option<&str>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(PlacesError::Api {
            status: other.to_owned(),
            message: error_message.unwrap_or("no error message").to_owned(),
        }),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
