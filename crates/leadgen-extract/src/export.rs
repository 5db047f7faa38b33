use leadgen_core::Lead;

pub const CSV_HEADER: &str = "Name,Type,Phone,Email,Website,Rating,Reviews,Address,Maps Link";

/// Renders leads as CSV: the fixed nine-column header, then one row per lead
/// joined by `\n`. String fields are quoted with inner quotes doubled; rating
/// and review count are bare numbers. No leads renders as an empty string.
#[must_use]
pub fn leads_to_csv(leads: &[Lead]) -> String {
    if leads.is_empty() {
        return String::new();
    }

    let mut rows = Vec::with_capacity(leads.len() + 1);
    rows.push(CSV_HEADER.to_string());
    rows.extend(leads.iter().map(csv_row));
    rows.join("\n")
}

fn csv_row(lead: &Lead) -> String {
    [
        quoted(&lead.name),
        quoted(&lead.business_type),
        quoted(&lead.phone),
        quoted(&lead.email),
        quoted(&lead.website),
        lead.rating.to_string(),
        lead.review_count.to_string(),
        quoted(&lead.address),
        quoted(&lead.maps_link),
    ]
    .join(",")
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use leadgen_core::ServiceId;

    use super::*;

    fn lead(name: &str, address: &str) -> Lead {
        Lead {
            name: name.into(),
            phone: "N/A".into(),
            website: String::new(),
            email: "hi@obriens.example".into(),
            instagram: String::new(),
            linkedin: String::new(),
            rating: 4.5,
            review_count: 120,
            address: address.into(),
            maps_link: "https://maps.example/o".into(),
            business_type: "Cafe".into(),
            recommended_service: ServiceId::Build,
        }
    }

    #[test]
    fn quotes_are_doubled_and_numbers_bare() {
        let csv = leads_to_csv(&[lead("O'Brien's Cafe", r#"12 "Old" Mill Rd, Cork"#)]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(
                r#""O'Brien's Cafe","Cafe","N/A","hi@obriens.example","",4.5,120,"12 ""Old"" Mill Rd, Cork","https://maps.example/o""#
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn whole_ratings_render_without_decimals() {
        let mut l = lead("A", "B");
        l.rating = 4.0;
        let csv = leads_to_csv(&[l]);
        assert!(csv.ends_with(r#","",4,120,"B","https://maps.example/o""#));
    }

    #[test]
    fn rows_are_newline_joined_without_trailing_newline() {
        let csv = leads_to_csv(&[lead("A", "x"), lead("B", "y")]);
        assert_eq!(csv.matches('\n').count(), 2);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn no_leads_is_empty() {
        assert_eq!(leads_to_csv(&[]), "");
    }
}
