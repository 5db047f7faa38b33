use super::*;

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from([
        "leadgen-cli",
        "search",
        "--niche",
        "Plumber",
        "--location",
        "Austin, TX",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            ref niche,
            ref location,
            count: 10,
            output: None,
            no_history: false,
        } if niche == "Plumber" && location == "Austin, TX"
    ));
}

#[test]
fn parses_search_with_output_and_no_history() {
    let cli = Cli::try_parse_from([
        "leadgen-cli",
        "search",
        "--niche",
        "Dentist",
        "--location",
        "Denver",
        "--count",
        "50",
        "--output",
        "out.csv",
        "--no-history",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Search {
            count: 50,
            output: Some(ref path),
            no_history: true,
            ..
        } if path == std::path::Path::new("out.csv")
    ));
}

#[test]
fn search_requires_niche_and_location() {
    assert!(Cli::try_parse_from(["leadgen-cli", "search", "--niche", "Plumber"]).is_err());
}

#[test]
fn parses_pitch_with_service() {
    let cli = Cli::try_parse_from(["leadgen-cli", "pitch", "abc", "3", "--service", "care"])
        .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Pitch {
            ref id,
            lead: 3,
            service: Some(ServiceId::Care),
        } if id == "abc"
    ));
}

#[test]
fn pitch_rejects_unknown_service() {
    let result = Cli::try_parse_from(["leadgen-cli", "pitch", "abc", "1", "--service", "seo"]);
    assert!(result.is_err());
}

#[test]
fn parses_export_without_output() {
    let cli = Cli::try_parse_from(["leadgen-cli", "export", "abc"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Export { ref id, output: None } if id == "abc"
    ));
}

#[test]
fn parses_history_subcommands() {
    let cli = Cli::try_parse_from(["leadgen-cli", "history", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::History {
            command: HistoryCommands::List
        }
    ));

    let cli = Cli::try_parse_from(["leadgen-cli", "history", "show", "abc", "--filter", "main"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Commands::History {
            command: HistoryCommands::Show { ref id, filter: Some(ref f) }
        } if id == "abc" && f == "main"
    ));

    let cli = Cli::try_parse_from(["leadgen-cli", "history", "clear"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::History {
            command: HistoryCommands::Clear
        }
    ));
}

#[test]
fn parses_settings_set() {
    let cli = Cli::try_parse_from([
        "leadgen-cli",
        "settings",
        "set",
        "--openai-key",
        "sk-test",
        "--pitch-model",
        "openai",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Settings {
            command: SettingsCommands::Set {
                gemini_key: None,
                openai_key: Some(ref key),
                pitch_model: Some(PitchModel::OpenAi),
                ..
            }
        } if key == "sk-test"
    ));
}

#[test]
fn settings_rejects_unknown_pitch_model() {
    let result = Cli::try_parse_from(["leadgen-cli", "settings", "set", "--pitch-model", "llama"]);
    assert!(result.is_err());
}

#[test]
fn parses_services() {
    let cli = Cli::try_parse_from(["leadgen-cli", "services"]).unwrap();
    assert!(matches!(cli.command, Commands::Services));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["leadgen-cli"]).is_err());
}
