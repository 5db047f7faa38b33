//! The catalog of sellable service offers.
//!
//! A built-in catalog ships with the crate; deployments may replace it with a
//! YAML file of the same shape:
//!
//! ```yaml
//! services:
//!   - id: check
//!     title: Website Check
//!     price: $27
//!     description: A complete mini-audit of the client's website.
//!     features: [Design & UX analysis, Speed & Mobile check]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::leads::ServiceId;
use crate::ConfigError;

/// Ids the recommendation rules can emit. A catalog without them could not
/// resolve a lead's recommendation.
const RECOMMENDABLE: [ServiceId; 3] = [ServiceId::Build, ServiceId::Care, ServiceId::Check];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffer {
    pub id: ServiceId,
    pub title: String,
    pub price: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub services: Vec<ServiceOffer>,
}

impl ServiceCatalog {
    #[must_use]
    pub fn find(&self, id: ServiceId) -> Option<&ServiceOffer> {
        self.services.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, ServiceOffer> {
        self.services.iter()
    }
}

impl<'a> IntoIterator for &'a ServiceCatalog {
    type Item = &'a ServiceOffer;
    type IntoIter = std::slice::Iter<'a, ServiceOffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        fn offer(
            id: ServiceId,
            title: &str,
            price: &str,
            description: &str,
            features: [&str; 5],
        ) -> ServiceOffer {
            ServiceOffer {
                id,
                title: title.to_string(),
                price: price.to_string(),
                description: description.to_string(),
                features: features.iter().map(ToString::to_string).collect(),
            }
        }

        Self {
            services: vec![
                offer(
                    ServiceId::Check,
                    "Website Check",
                    "$27",
                    "A complete mini-audit of the client's website.",
                    [
                        "Design & UX analysis",
                        "Speed & Mobile check",
                        "SEO basics review",
                        "Broken element detection",
                        "PDF Report included",
                    ],
                ),
                offer(
                    ServiceId::Fix,
                    "Quick Fix",
                    "$79",
                    "Fix major issues found during the website check.",
                    [
                        "Layout correction",
                        "Speed optimization",
                        "Button/Link fixes",
                        "Mobile view enhancement",
                        "Basic SEO fixes",
                    ],
                ),
                offer(
                    ServiceId::Build,
                    "New Website Build",
                    "$249",
                    "Fully modern, fast, mobile-friendly website.",
                    [
                        "Built from scratch",
                        "Mobile-responsive",
                        "Essential pages (Home, About, etc.)",
                        "Clean design",
                        "3-5 day delivery",
                    ],
                ),
                offer(
                    ServiceId::Care,
                    "Monthly Website Care",
                    "$29/mo",
                    "Ongoing support to keep the site running smoothly.",
                    [
                        "Monthly edits",
                        "Speed checks",
                        "Security monitoring",
                        "Content updates",
                        "Priority support",
                    ],
                ),
            ],
        }
    }
}

/// Load and validate a service catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_services(path: &Path) -> Result<ServiceCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ServicesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: ServiceCatalog =
        serde_yaml::from_str(&content).map_err(ConfigError::ServicesFileParse)?;

    validate_services(&catalog)?;

    Ok(catalog)
}

fn validate_services(catalog: &ServiceCatalog) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for service in &catalog.services {
        if service.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "service '{}' must have a non-empty title",
                service.id
            )));
        }

        if !seen.insert(service.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate service id: '{}'",
                service.id
            )));
        }
    }

    for id in RECOMMENDABLE {
        if !seen.contains(&id) {
            return Err(ConfigError::Validation(format!(
                "service catalog is missing required id '{id}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ServiceCatalog {
        serde_yaml::from_str(yaml).expect("valid yaml")
    }

    #[test]
    fn default_catalog_is_valid() {
        let catalog = ServiceCatalog::default();
        assert_eq!(catalog.services.len(), 4);
        validate_services(&catalog).expect("built-in catalog must validate");
        assert_eq!(catalog.find(ServiceId::Build).unwrap().price, "$249");
        assert_eq!(catalog.find(ServiceId::Care).unwrap().title, "Monthly Website Care");
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let catalog = parse(
            r"
services:
  - { id: build, title: Build, price: $1, description: d }
  - { id: care, title: Care, price: $1, description: d }
  - { id: check, title: Check, price: $1, description: d }
  - { id: check, title: Again, price: $1, description: d }
",
        );
        let err = validate_services(&catalog).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn validate_requires_recommendable_ids() {
        let catalog = parse(
            r"
services:
  - { id: build, title: Build, price: $1, description: d }
  - { id: fix, title: Fix, price: $1, description: d }
",
        );
        let err = validate_services(&catalog).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("care")));
    }

    #[test]
    fn validate_rejects_blank_title() {
        let catalog = parse(
            r"
services:
  - { id: build, title: '  ', price: $1, description: d }
",
        );
        assert!(validate_services(&catalog).is_err());
    }

    #[test]
    fn unknown_service_id_fails_to_parse() {
        let result: Result<ServiceCatalog, _> = serde_yaml::from_str(
            "services:\n  - { id: seo, title: SEO, price: $1, description: d }\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_services_reports_missing_file() {
        let err = load_services(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ServicesFileIo { .. }));
    }
}
