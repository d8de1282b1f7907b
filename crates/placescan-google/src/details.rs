//! Normalization of place-details responses into [`PlaceDetail`].

use placescan_core::PlaceDetail;

use crate::types::PlaceDetailsResult;

/// Picks the phone number to report.
///
/// The local format wins when it is non-empty, then the international one,
/// then the empty string. The result is never absent.
#[must_use]
pub fn resolve_phone(formatted: Option<&str>, international: Option<&str>) -> String {
    formatted
        .filter(|p| !p.is_empty())
        .or(international)
        .unwrap_or_default()
        .to_owned()
}

/// Converts a raw details result into a [`PlaceDetail`].
///
/// Missing name and address become empty strings. `website` is dropped
/// unless it was requested, so rows never carry a field the run did not ask
/// for.
#[must_use]
pub fn normalize_details(result: PlaceDetailsResult, include_website: bool) -> PlaceDetail {
    let phone = resolve_phone(
        result.formatted_phone_number.as_deref(),
        result.international_phone_number.as_deref(),
    );
    let website = if include_website {
        Some(result.website.unwrap_or_default())
    } else {
        None
    };

    PlaceDetail {
        name: result.name.unwrap_or_default(),
        formatted_address: result.formatted_address.unwrap_or_default(),
        phone,
        website,
    }
}
