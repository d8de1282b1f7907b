//! Place data as it moves through a run, ending in [`ResultRecord`].

use serde::Serialize;

use crate::address::AddressParts;
use crate::geo::GeoPoint;
use crate::keywords::Keyword;

/// One nearby-search hit. Lives only while its keyword is being processed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    /// Opaque provider identifier, unique per physical place.
    pub place_id: String,
    pub location: GeoPoint,
    /// Name reported by the search response; the detail lookup is authoritative.
    pub name: Option<String>,
}

/// Detail fields for one place, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceDetail {
    pub name: String,
    pub formatted_address: String,
    /// Never absent: empty when the provider has no number.
    pub phone: String,
    pub website: Option<String>,
}

/// One output row: a unique place plus the keyword that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub keyword: String,
    pub name: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub phone: String,
    pub website: Option<String>,
    /// Whole meters from the search center, truncated.
    pub distance_m: u32,
}

impl ResultRecord {
    /// Combines the pieces gathered for one place into a row.
    ///
    /// `distance_m` is truncated toward zero; display precision is whole
    /// meters.
    #[must_use]
    pub fn assemble(
        keyword: &Keyword,
        detail: PlaceDetail,
        address: AddressParts,
        distance_m: f64,
    ) -> Self {
        // Float-to-int `as` saturates, so NaN/negative map to 0 and huge to u32::MAX.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let distance_m = distance_m.trunc() as u32;

        Self {
            keyword: keyword.as_str().to_owned(),
            name: detail.name,
            street: address.street,
            house_number: address.house_number,
            postal_code: address.postal_code,
            city: address.city,
            phone: detail.phone,
            website: detail.website,
            distance_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> PlaceDetail {
        PlaceDetail {
            name: "Coaching Müller".to_owned(),
            formatted_address: "Hauptstraße 12a, 44135 Dortmund".to_owned(),
            phone: "0231 123456".to_owned(),
            website: Some("https://coaching-mueller.de/".to_owned()),
        }
    }

    fn address() -> AddressParts {
        AddressParts {
            street: "Hauptstraße".to_owned(),
            house_number: "12a".to_owned(),
            postal_code: "44135".to_owned(),
            city: "Dortmund".to_owned(),
        }
    }

    #[test]
    fn assemble_copies_all_fields() {
        let kw = Keyword::new("coach").unwrap();
        let record = ResultRecord::assemble(&kw, detail(), address(), 812.4);
        assert_eq!(record.keyword, "coach");
        assert_eq!(record.name, "Coaching Müller");
        assert_eq!(record.street, "Hauptstraße");
        assert_eq!(record.house_number, "12a");
        assert_eq!(record.postal_code, "44135");
        assert_eq!(record.city, "Dortmund");
        assert_eq!(record.phone, "0231 123456");
        assert_eq!(
            record.website.as_deref(),
            Some("https://coaching-mueller.de/")
        );
        assert_eq!(record.distance_m, 812);
    }

    #[test]
    fn assemble_truncates_rather_than_rounds() {
        let kw = Keyword::new("coach").unwrap();
        let record = ResultRecord::assemble(&kw, detail(), address(), 999.999);
        assert_eq!(record.distance_m, 999);
    }

    #[test]
    fn record_serializes_with_snake_case_fields() {
        let kw = Keyword::new("Arzt").unwrap();
        let record = ResultRecord::assemble(&kw, PlaceDetail::default(), address(), 0.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["keyword"], "Arzt");
        assert_eq!(json["house_number"], "12a");
        assert_eq!(json["distance_m"], 0);
        assert!(json["website"].is_null());
    }
}
