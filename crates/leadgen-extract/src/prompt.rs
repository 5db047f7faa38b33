//! Prompt builders for extraction and pitch generation.

use leadgen_core::{Lead, SearchParams, ServiceOffer};

/// Instruction for one extraction run: exact count, category, location, the
/// website fallback search strategy, and the output contract.
#[must_use]
pub fn extraction_prompt(params: &SearchParams) -> String {
    let SearchParams {
        niche,
        location,
        count,
    } = params;

    format!(
        r#"Task: Find exactly {count} existing businesses in the category "{niche}" located in "{location}".

Execution Steps:
1. Search Maps: Use 'googleMaps' to find businesses matching the criteria.
2. Verify Website: Check if the Maps result includes a website.
3. Deep Search (CRITICAL): If a business DOES NOT have a website on Maps, you MUST use 'googleSearch' to search for: "{niche} {location} [Business Name] official website".
4. Socials: If no website is found, look for Instagram or Facebook pages using 'googleSearch'.

Data Requirements:
- Name: Exact business name.
- Phone: Local phone number (or 'N/A').
- Website: The official URL. If absolutely none exists after searching, return "".
- Address: Full street address.
- Rating: Google Maps rating (0-5).
- Reviews: Number of reviews.
- Email: Try to find a public contact email (info@, contact@) via search.

Output Format:
Return ONLY a JSON array. No markdown, no text explanations.

Example JSON:
[
  {{
    "name": "Joe's Plumbing",
    "phone": "555-0123",
    "website": "https://joesplumbing.com",
    "instagram": "https://instagram.com/joesplumbing",
    "linkedin": "",
    "email": "hello@joesplumbing.com",
    "rating": 4.8,
    "reviewCount": 124,
    "address": "123 Main St, Austin, TX",
    "type": "Plumber"
  }}
]
"#
    )
}

/// Cold outreach email instruction for pitching `service` to `lead`.
#[must_use]
pub fn pitch_prompt(service: &ServiceOffer, lead: &Lead) -> String {
    let website = if lead.has_website() {
        lead.website.as_str()
    } else {
        "NO WEBSITE (This is the main pain point!)"
    };

    format!(
        r#"Write a highly personalized cold outreach email to "{name}".

Sender's Service Offer: "{service}"

Target Business Details:
- Name: {name}
- Type: {kind}
- Location: {address}
- Website: {website}
- Rating: {rating} stars ({reviews} reviews)

INSTRUCTIONS:
1. Subject Line: Catchy, short, and relevant to their business/location.
2. Opening: Mention you found them searching for {kind} in {locality}. Prove you aren't a bot by mentioning their rating or review count.
3. The Hook:
   - If they have NO website: Focus on how much business they are losing to competitors.
   - If they have a website but we are selling "Website Check": Mention that their site could convert better.
   - If they have low ratings and we are selling "Monthly Care": Focus on reputation management.
4. Call to Action: Low friction (e.g., "Can I send over a quick video?").

Tone: Professional, helpful, concise. NOT salesy or spammy.
Length: Under 150 words.
"#,
        name = lead.name,
        service = service.title,
        kind = lead.business_type,
        address = lead.address,
        rating = lead.rating,
        reviews = lead.review_count,
        locality = lead.locality(),
    )
}

#[cfg(test)]
mod tests {
    use leadgen_core::{ServiceCatalog, ServiceId};

    use super::*;

    fn lead(website: &str) -> Lead {
        Lead {
            name: "Joe's Plumbing".into(),
            phone: "555-0123".into(),
            website: website.into(),
            email: String::new(),
            instagram: String::new(),
            linkedin: String::new(),
            rating: 4.5,
            review_count: 88,
            address: "123 Main St, Austin, TX".into(),
            maps_link: String::new(),
            business_type: "Plumber".into(),
            recommended_service: ServiceId::Check,
        }
    }

    #[test]
    fn extraction_prompt_names_count_niche_and_location() {
        let params = SearchParams::new("Plumber", "Austin, TX", 20).unwrap();
        let prompt = extraction_prompt(&params);
        assert!(prompt.contains("Find exactly 20 existing businesses"));
        assert!(prompt.contains(r#"category "Plumber" located in "Austin, TX""#));
        assert!(prompt.contains("Plumber Austin, TX [Business Name] official website"));
        assert!(prompt.contains("Return ONLY a JSON array"));
        assert!(prompt.contains(r#""reviewCount": 124"#));
    }

    #[test]
    fn pitch_prompt_flags_missing_website() {
        let catalog = ServiceCatalog::default();
        let service = catalog.find(ServiceId::Build).unwrap();
        let prompt = pitch_prompt(service, &lead(""));
        assert!(prompt.contains(r#"Sender's Service Offer: "New Website Build""#));
        assert!(prompt.contains("NO WEBSITE (This is the main pain point!)"));
        assert!(prompt.contains("searching for Plumber in 123 Main St."));
        assert!(prompt.contains("4.5 stars (88 reviews)"));
    }

    #[test]
    fn pitch_prompt_includes_existing_website() {
        let catalog = ServiceCatalog::default();
        let service = catalog.find(ServiceId::Check).unwrap();
        let prompt = pitch_prompt(service, &lead("https://joes.example"));
        assert!(prompt.contains("- Website: https://joes.example"));
    }
}
