/// Extracts the JSON array embedded in a model response.
///
/// Code fences are removed, the text is trimmed, and the span from the first
/// `[` to the last `]` is returned. Text without such a span comes back
/// trimmed but otherwise unchanged so the parser can reject it.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let unfenced = raw.replace("```json", "").replace("```", "");
    let trimmed = unfenced.trim();

    match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if end > start => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}
