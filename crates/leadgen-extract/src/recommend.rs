use leadgen_core::{Lead, ServiceId, NOT_AVAILABLE};

/// Ratings below this are pitched ongoing care.
pub const CARE_RATING_THRESHOLD: f64 = 4.0;

/// The service to pitch a lead. First matching rule wins:
///
/// 1. no website (empty or `"N/A"`) → [`ServiceId::Build`]
/// 2. rating below 4.0 → [`ServiceId::Care`]
/// 3. otherwise → [`ServiceId::Check`]
///
/// A rating of `0` means "no rating data" but still counts as below the
/// threshold.
#[must_use]
pub fn recommend(lead: &Lead) -> ServiceId {
    recommend_for(&lead.website, lead.rating)
}

#[must_use]
pub fn recommend_for(website: &str, rating: f64) -> ServiceId {
    let website = website.trim();
    if website.is_empty() || website == NOT_AVAILABLE {
        ServiceId::Build
    } else if rating < CARE_RATING_THRESHOLD {
        ServiceId::Care
    } else {
        ServiceId::Check
    }
}
