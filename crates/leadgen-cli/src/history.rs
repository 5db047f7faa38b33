use clap::Subcommand;
use leadgen_core::Lead;

use crate::context::CliContext;
use crate::leads::{find_item, print_leads, truncate};

/// Sub-commands available under `history`.
#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// List recent searches, newest first
    List,
    /// Show the leads of one search
    Show {
        id: String,
        /// Only show leads whose name or address contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Delete all saved searches
    Clear,
}

pub(crate) fn run(ctx: &CliContext, command: HistoryCommands) -> anyhow::Result<()> {
    match command {
        HistoryCommands::List => run_history_list(ctx),
        HistoryCommands::Show { id, filter } => run_history_show(ctx, &id, filter.as_deref()),
        HistoryCommands::Clear => run_history_clear(ctx),
    }
}

fn run_history_list(ctx: &CliContext) -> anyhow::Result<()> {
    let history = ctx.history()?;
    if history.is_empty() {
        println!("no saved searches; run `search` first");
        return Ok(());
    }

    println!(
        "{:<38}{:<18}{:<22}{:<26}LEADS",
        "ID", "DATE", "NICHE", "LOCATION"
    );
    for item in history.items() {
        println!(
            "{:<38}{:<18}{:<22}{:<26}{}",
            item.id,
            item.created_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate(&item.params.niche, 20),
            truncate(&item.params.location, 24),
            item.leads.len()
        );
    }
    Ok(())
}

fn run_history_show(ctx: &CliContext, id: &str, filter: Option<&str>) -> anyhow::Result<()> {
    let history = ctx.history()?;
    let item = find_item(history.items(), id)?;

    println!(
        "{} in {} ({} lead(s), {})\n",
        item.params.niche,
        item.params.location,
        item.leads.len(),
        item.created_at.format("%Y-%m-%d %H:%M UTC")
    );

    let matches = numbered_matches(&item.leads, filter.unwrap_or_default());
    if matches.is_empty() {
        println!("no leads match");
        return Ok(());
    }

    print_leads(matches);
    Ok(())
}

/// Leads matching `query`, paired with their index in the full list so the
/// printed numbers still line up with `pitch <id> <n>`.
fn numbered_matches<'a>(leads: &'a [Lead], query: &str) -> Vec<(usize, &'a Lead)> {
    leads
        .iter()
        .enumerate()
        .filter(|(_, lead)| lead.matches(query))
        .collect()
}

fn run_history_clear(ctx: &CliContext) -> anyhow::Result<()> {
    let mut history = ctx.history()?;
    let removed = history.len();
    history.clear();
    history.save(&ctx.store)?;
    println!("cleared {removed} saved search(es)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use leadgen_core::ServiceId;

    use super::*;

    fn lead(name: &str, address: &str) -> Lead {
        Lead {
            name: name.to_string(),
            phone: "N/A".to_string(),
            website: String::new(),
            email: String::new(),
            instagram: String::new(),
            linkedin: String::new(),
            rating: 0.0,
            review_count: 0,
            address: address.to_string(),
            maps_link: String::new(),
            business_type: "Plumber".to_string(),
            recommended_service: ServiceId::Build,
        }
    }

    #[test]
    fn numbered_matches_keep_original_positions() {
        let leads = vec![
            lead("Joe's Plumbing", "123 Main St, Austin"),
            lead("Drain Kings", "9 Oak Ave, Round Rock"),
            lead("Main Line Pipes", "4 Elm St, Austin"),
        ];

        let hits: Vec<(usize, &str)> = numbered_matches(&leads, "main")
            .into_iter()
            .map(|(i, lead)| (i, lead.name.as_str()))
            .collect();
        assert_eq!(hits, [(0, "Joe's Plumbing"), (2, "Main Line Pipes")]);

        assert_eq!(numbered_matches(&leads, "").len(), 3);
        assert!(numbered_matches(&leads, "dallas").is_empty());
    }
}
