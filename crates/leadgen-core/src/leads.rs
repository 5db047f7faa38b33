//! Lead records: the loosely-typed shape a model returns and the fully
//! populated shape the rest of the system works with.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Placeholder meaning "unknown". Used for phone numbers, and tolerated in
/// place of a website.
pub const NOT_AVAILABLE: &str = "N/A";

/// Identifier of a sellable service offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    Check,
    Fix,
    Build,
    Care,
}

impl ServiceId {
    pub const ALL: [ServiceId; 4] = [
        ServiceId::Check,
        ServiceId::Fix,
        ServiceId::Build,
        ServiceId::Care,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceId::Check => "check",
            ServiceId::Fix => "fix",
            ServiceId::Build => "build",
            ServiceId::Care => "care",
        }
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ServiceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownService(s.to_string()))
    }
}

/// One normalized business candidate.
///
/// Every string field is populated. Empty strings mean "not found"; for
/// `website` that absence is the signal the recommendation rules key on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub name: String,
    /// [`NOT_AVAILABLE`] when unknown, never empty.
    pub phone: String,
    pub website: String,
    pub email: String,
    pub instagram: String,
    pub linkedin: String,
    /// Star rating in `[0, 5]`. `0` doubles as "no rating data" and cannot be
    /// told apart from a genuine zero.
    pub rating: f64,
    pub review_count: u64,
    pub address: String,
    #[serde(alias = "googleMapsLink")]
    pub maps_link: String,
    #[serde(rename = "type")]
    pub business_type: String,
    #[serde(alias = "recommendedServiceId")]
    pub recommended_service: ServiceId,
}

impl Lead {
    /// First comma-delimited segment of the address, conventionally the
    /// street or locality.
    #[must_use]
    pub fn locality(&self) -> &str {
        self.address.split(',').next().unwrap_or_default().trim()
    }

    /// False for an empty website or the literal [`NOT_AVAILABLE`] sentinel.
    #[must_use]
    pub fn has_website(&self) -> bool {
        let website = self.website.trim();
        !website.is_empty() && website != NOT_AVAILABLE
    }

    /// Case-insensitive substring match on name or address. A blank query
    /// matches every lead.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.address.to_lowercase().contains(&needle)
    }
}

/// Case-insensitive substring filter over lead name and address.
///
/// An empty (or whitespace-only) query keeps every lead.
#[must_use]
pub fn filter_leads<'a>(leads: &'a [Lead], query: &str) -> Vec<&'a Lead> {
    leads.iter().filter(|lead| lead.matches(query)).collect()
}

/// A lead exactly as the model produced it. Every field is optional and
/// tolerant of the wrong JSON type: strings may arrive as numbers, ratings
/// and counts as strings. Values that cannot be interpreted become `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLead {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub instagram: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(
        default,
        rename = "reviewCount",
        alias = "review_count",
        alias = "reviews",
        deserialize_with = "lenient_u64"
    )]
    pub review_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(
        default,
        rename = "mapsLink",
        alias = "googleMapsLink",
        deserialize_with = "lenient_string"
    )]
    pub maps_link: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub business_type: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().and_then(whole_count)),
        Some(Value::String(s)) => {
            let digits: String = s.chars().filter(|c| *c != ',').collect();
            let digits = digits.trim();
            digits
                .parse::<u64>()
                .ok()
                .or_else(|| digits.parse::<f64>().ok().and_then(whole_count))
        }
        _ => None,
    };
    Ok(parsed)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}
