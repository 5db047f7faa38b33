use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Lead counts a search may ask for.
pub const LEAD_COUNTS: [u32; 4] = [10, 20, 50, 100];

/// Validated parameters for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub niche: String,
    pub location: String,
    pub count: u32,
}

impl SearchParams {
    /// Builds search parameters, trimming niche and location.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSearch`] if niche or location is blank or
    /// `count` is not one of [`LEAD_COUNTS`].
    pub fn new(niche: &str, location: &str, count: u32) -> Result<Self, CoreError> {
        let niche = niche.trim();
        let location = location.trim();

        if niche.is_empty() {
            return Err(CoreError::InvalidSearch("niche must be non-empty".into()));
        }
        if location.is_empty() {
            return Err(CoreError::InvalidSearch(
                "location must be non-empty".into(),
            ));
        }
        if !LEAD_COUNTS.contains(&count) {
            return Err(CoreError::InvalidSearch(format!(
                "count {count} is not one of {LEAD_COUNTS:?}"
            )));
        }

        Ok(Self {
            niche: niche.to_string(),
            location: location.to_string(),
            count,
        })
    }

    /// File name stem for exported results, e.g. `leads-plumber-austin,-tx`.
    #[must_use]
    pub fn export_stem(&self) -> String {
        let raw = format!("leads-{}-{}", self.niche, self.location);
        raw.split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    }
}
