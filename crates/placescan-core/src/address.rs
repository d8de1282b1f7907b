//! Best-effort decomposition of free-text addresses.
//!
//! Google returns a single `formatted_address` string. [`GermanAddressParser`]
//! understands the German `"<street> <no>, <PLZ> <city>"` layout and falls
//! back to a comma split for anything else. It is a heuristic tied to one
//! country's convention; other locales get their own [`AddressParser`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static GERMAN_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s+(\d+\w*),\s*(\d{5})\s+(.*)$").expect("valid regex")
});

/// Address fields. Any of them may be empty when parsing only partly succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressParts {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
}

/// Strategy for splitting a formatted address into [`AddressParts`].
///
/// Parsing never fails: an unrecognized layout yields partially filled parts.
pub trait AddressParser {
    fn parse(&self, address: &str) -> AddressParts;
}

/// Parser for German-style addresses with five-digit postal codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanAddressParser;

impl AddressParser for GermanAddressParser {
    fn parse(&self, address: &str) -> AddressParts {
        if let Some(caps) = GERMAN_ADDRESS_RE.captures(address) {
            let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_owned();
            return AddressParts {
                street: group(1),
                house_number: group(2),
                postal_code: group(3),
                city: group(4),
            };
        }
        split_on_commas(address)
    }
}

/// First segment is the street, last segment (if there are several) the city.
fn split_on_commas(address: &str) -> AddressParts {
    let segments: Vec<&str> = address.split(',').map(str::trim).collect();
    let street = segments.first().copied().unwrap_or_default().to_owned();
    let city = if segments.len() > 1 {
        segments.last().copied().unwrap_or_default().to_owned()
    } else {
        String::new()
    };
    AddressParts {
        street,
        city,
        ..AddressParts::default()
    }
}
