//! Turns a [`RawLead`] into a fully populated [`Lead`].

use leadgen_core::{Lead, RawLead, NOT_AVAILABLE};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::recommend::recommend_for;

/// Name given to a record the model returned without one.
pub const UNNAMED_BUSINESS: &str = "Unnamed business";

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Characters left unescaped by a URI component encoder.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Never fails. Absent or blank fields get their defaults, then the
/// recommendation is derived from the normalized website and rating.
#[must_use]
pub fn normalize(raw: RawLead, fallback_type: &str) -> Lead {
    let name = present(raw.name).unwrap_or_else(|| UNNAMED_BUSINESS.to_string());
    let address = present(raw.address).unwrap_or_default();
    let website = present(raw.website).unwrap_or_default();
    let rating = raw.rating.map_or(0.0, |r| r.clamp(0.0, 5.0));
    let maps_link = present(raw.maps_link).unwrap_or_else(|| maps_link(&name, &address));
    let recommended_service = recommend_for(&website, rating);

    Lead {
        phone: present(raw.phone).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        email: present(raw.email).unwrap_or_default(),
        instagram: present(raw.instagram).unwrap_or_default(),
        linkedin: present(raw.linkedin).unwrap_or_default(),
        review_count: raw.review_count.unwrap_or(0),
        business_type: present(raw.business_type)
            .unwrap_or_else(|| fallback_type.trim().to_string()),
        name,
        website,
        rating,
        address,
        maps_link,
        recommended_service,
    }
}

/// Google Maps search URL for a business name and address.
#[must_use]
pub fn maps_link(name: &str, address: &str) -> String {
    let query = format!("{name} {address}");
    format!(
        "{MAPS_SEARCH_URL}{}",
        utf8_percent_encode(query.trim(), QUERY_COMPONENT)
    )
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
