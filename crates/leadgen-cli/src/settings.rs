use clap::Subcommand;
use leadgen_core::{PitchModel, SettingsUpdate};

use crate::context::CliContext;

/// Sub-commands available under `settings`.
#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show which keys are configured and the pitch model
    Show,
    /// Update keys or the pitch model; pass an empty value to clear a key
    Set {
        #[arg(long)]
        gemini_key: Option<String>,
        #[arg(long)]
        openai_key: Option<String>,
        #[arg(long)]
        claude_key: Option<String>,
        #[arg(long)]
        grok_key: Option<String>,
        /// gemini, openai, claude or grok
        #[arg(long, value_parser = crate::parse_pitch_model)]
        pitch_model: Option<PitchModel>,
    },
}

pub(crate) fn run(ctx: &CliContext, command: SettingsCommands) -> anyhow::Result<()> {
    match command {
        SettingsCommands::Show => run_settings_show(ctx),
        SettingsCommands::Set {
            gemini_key,
            openai_key,
            claude_key,
            grok_key,
            pitch_model,
        } => {
            let update = SettingsUpdate {
                gemini_key,
                openai_key,
                claude_key,
                grok_key,
                pitch_model,
            };
            let mut settings = ctx.settings()?;
            settings.apply(update);
            settings.save(&ctx.store)?;
            tracing::info!(pitch_model = %settings.pitch_model, "settings saved");
            run_settings_show(ctx)
        }
    }
}

fn run_settings_show(ctx: &CliContext) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let keys = settings.key_presence();
    let status = |set: bool| if set { "set" } else { "not set" };

    println!("pitch model:  {}", settings.pitch_model.display_name());
    println!("gemini key:   {}", status(keys.gemini));
    println!("openai key:   {}", status(keys.openai));
    println!("claude key:   {}", status(keys.claude));
    println!("grok key:     {}", status(keys.grok));
    if !keys.gemini {
        println!("\nsearch needs a Gemini key: settings set --gemini-key <KEY>");
    }
    Ok(())
}
