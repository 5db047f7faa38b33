//! Search, export and pitch command handlers.

use std::path::{Path, PathBuf};

use leadgen_core::{HistoryItem, Lead, SearchParams, ServiceId};
use leadgen_extract::{
    extract_leads, leads_to_csv, pitch_service, GeminiClient, PitchClients, Progress, ProgressFn,
};

use crate::context::CliContext;

/// Run one extraction, print the leads, and optionally write CSV and record
/// the search in history.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the extraction fails, or
/// the CSV file or history cannot be written.
pub(crate) async fn run_search(
    ctx: &CliContext,
    niche: &str,
    location: &str,
    count: u32,
    output: Option<&Path>,
    record_history: bool,
) -> anyhow::Result<()> {
    let params = SearchParams::new(niche, location, count)?;
    let settings = ctx.settings()?;
    let client = GeminiClient::from_config(&ctx.config)?;

    let progress = |step: Progress| println!("{step}");
    let leads = extract_leads(
        &client,
        &settings.gemini_key,
        &params,
        ctx.config.extraction_temperature,
        Some(&progress as &ProgressFn),
    )
    .await?;

    println!();
    print_leads(leads.iter().enumerate());
    println!(
        "\n{} lead(s) for \"{}\" in {}",
        leads.len(),
        params.niche,
        params.location
    );

    if let Some(path) = output {
        write_csv(path, &leads)?;
    }

    if record_history {
        let mut history = ctx.history()?;
        let id = history.record(params, leads).id.clone();
        history.save(&ctx.store)?;
        println!("saved to history as {id}");
    }

    Ok(())
}

/// Write a past search's leads as CSV.
///
/// # Errors
///
/// Returns an error if the history item does not exist or the file cannot be
/// written.
pub(crate) fn run_export(ctx: &CliContext, id: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let history = ctx.history()?;
    let item = find_item(history.items(), id)?;

    let path = output.map_or_else(
        || PathBuf::from(format!("{}.csv", item.params.export_stem())),
        Path::to_path_buf,
    );
    write_csv(&path, &item.leads)
}

/// Draft a pitch for one lead of a past search.
///
/// # Errors
///
/// Returns an error if the history item, lead or service cannot be found,
/// or if pitch generation fails.
pub(crate) async fn run_pitch(
    ctx: &CliContext,
    id: &str,
    lead_number: usize,
    service: Option<ServiceId>,
) -> anyhow::Result<()> {
    let history = ctx.history()?;
    let item = find_item(history.items(), id)?;
    let lead = lead_at(&item.leads, lead_number)?;

    let offer = pitch_service(&ctx.catalog, lead, service).ok_or_else(|| {
        anyhow::anyhow!(
            "service '{}' is not in the catalog; run `services` to list offers",
            service.unwrap_or(lead.recommended_service)
        )
    })?;

    let settings = ctx.settings()?;
    let clients = PitchClients::from_config(&ctx.config)?;
    let pitch = clients.generate_pitch(&settings, offer, lead).await?;

    println!(
        "Pitching {} to {} (via {})\n",
        offer.title,
        lead.name,
        pitch.provider.display_name()
    );
    println!("{}", pitch.pitch);
    Ok(())
}

pub(crate) fn find_item<'a>(items: &'a [HistoryItem], id: &str) -> anyhow::Result<&'a HistoryItem> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| anyhow::anyhow!("history item '{id}' not found; run `history list`"))
}

/// Resolves a 1-based lead number.
fn lead_at(leads: &[Lead], number: usize) -> anyhow::Result<&Lead> {
    number
        .checked_sub(1)
        .and_then(|i| leads.get(i))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "lead {number} does not exist; this search has {} lead(s)",
                leads.len()
            )
        })
}

/// Writes leads as CSV. No leads means no file.
fn write_csv(path: &Path, leads: &[Lead]) -> anyhow::Result<()> {
    if leads.is_empty() {
        println!("no leads; nothing written to {}", path.display());
        return Ok(());
    }
    std::fs::write(path, leads_to_csv(leads))?;
    tracing::info!(path = %path.display(), leads = leads.len(), "wrote CSV export");
    println!("wrote {} lead(s) to {}", leads.len(), path.display());
    Ok(())
}

/// Print leads as a table, numbered from 1 in their original order.
pub(crate) fn print_leads<'a>(leads: impl IntoIterator<Item = (usize, &'a Lead)>) {
    let header = format!(
        "{:<4}{:<32}{:<16}{:<8}{:<9}{:<8}WEBSITE",
        "#", "NAME", "PHONE", "RATING", "REVIEWS", "PITCH"
    );
    println!("{header}");
    for (index, lead) in leads {
        let website = if lead.has_website() {
            lead.website.as_str()
        } else {
            "\u{2014}"
        };
        println!(
            "{:<4}{:<32}{:<16}{:<8}{:<9}{:<8}{}",
            index + 1,
            truncate(&lead.name, 30),
            truncate(&lead.phone, 15),
            lead.rating,
            lead.review_count,
            lead.recommended_service.as_str(),
            website
        );
    }
}

pub(crate) fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        value.to_string()
    }
}
