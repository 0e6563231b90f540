//! Trip Planner - AI-assisted travel itineraries
//!
//! CLI entry point: one-shot planning commands plus the interactive TUI.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::{info, warn};

use tripplanner::cli::{Cli, Command, OutputFormat};
use tripplanner::config::Config;
use tripplanner::domain::{Coordinates, Language};
use tripplanner::locale::Messages;
use tripplanner::places::load_places;
use tripplanner::planner::{ItineraryPlanner, LocationInfoClient};
use tripplanner::prompts::PromptBuilder;
use tripplanner::{export, geo, llm, tui};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to file only; stdout belongs to command output and the TUI
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("tripplanner.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let lang = cli.lang.unwrap_or(config.language);

    info!(
        "Trip planner loaded config: provider={}, itinerary-model={}, info-model={}, lang={}",
        config.llm.provider, config.llm.itinerary_model, config.llm.info_model, lang
    );

    match cli.command {
        Some(command @ Command::Plan { .. }) => cmd_plan(&config, lang, &command).await,
        Some(Command::Info {
            place,
            destination,
            near,
        }) => cmd_info(&config, lang, &place, &destination, near).await,
        Some(Command::Suggest { query, source }) => cmd_suggest(&config, &query, source.as_deref()).await,
        Some(Command::Tui) => cmd_tui(&config, lang).await,
        Some(Command::Config) => cmd_config(&config),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn prompt_builder(config: &Config) -> Arc<PromptBuilder> {
    Arc::new(PromptBuilder::new(config.prompts.dir.as_deref()))
}

/// Generate an itinerary and print or save it
async fn cmd_plan(config: &Config, lang: Language, command: &Command) -> Result<()> {
    let Command::Plan { format, output, .. } = command else {
        return Err(eyre!("plan command expected"));
    };
    let prefs = command
        .to_preferences()
        .ok_or_else(|| eyre!("plan command expected"))?;

    let errors = config.validator().validate(&prefs);
    if !errors.is_empty() {
        for (field, message) in errors.messages(lang) {
            eprintln!("{} {}: {}", "✗".red(), field.bold(), message);
        }
        return Err(eyre!("Invalid trip preferences ({} field(s))", errors.len()));
    }

    config.validate()?;
    let client = llm::create_client(&config.llm)?;
    let planner = ItineraryPlanner::from_config(client, prompt_builder(config), &config.llm);

    eprintln!("{}", Messages::for_language(lang).generating.dimmed());
    let itinerary = match planner.request_itinerary(&prefs, lang).await {
        Ok(itinerary) => itinerary,
        Err(e) => {
            warn!(error = %e, "plan: itinerary generation failed");
            return Err(eyre!("{}", e.user_message(lang)));
        }
    };

    let rendered = match format {
        OutputFormat::Text => export::render_text(&itinerary, prefs.destination.trim(), lang),
        OutputFormat::Json => serde_json::to_string_pretty(&itinerary)? + "\n",
        OutputFormat::Csv => export::to_csv(&itinerary, lang)?,
    };

    match output.as_deref() {
        Some(path) => {
            fs::write(path, rendered).context(format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Saved".green(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Fetch grounded information about one place
async fn cmd_info(
    config: &Config,
    lang: Language,
    place: &str,
    destination: &str,
    near: Option<Coordinates>,
) -> Result<()> {
    config.validate()?;
    let client = llm::create_client(&config.llm)?;
    let info_client = LocationInfoClient::from_config(client, prompt_builder(config), &config.llm);

    let coords = match near {
        Some(coords) => Some(coords),
        None => geo::locate(&config.geo).await,
    };

    let info = match info_client.request_location_info(place, destination, coords, lang).await {
        Ok(info) => info,
        Err(e) => {
            warn!(error = %e, "info: lookup failed");
            return Err(eyre!("{}", e.user_message(lang)));
        }
    };

    let messages = Messages::for_language(lang);
    println!("{} {}\n", messages.updated_info.bold(), place.bold());
    println!("{}", info.text);

    let sources: Vec<_> = info.chunks.iter().filter_map(|c| c.uri().map(|uri| (c, uri))).collect();
    if !sources.is_empty() {
        println!("\n{}", messages.sources.bold());
        for (chunk, uri) in sources {
            let label = if chunk.is_maps() { messages.map_link } else { messages.web_link };
            println!("  - {}: {}", chunk.title().unwrap_or(label), uri.cyan());
        }
    }
    Ok(())
}

/// Print destination suggestions for a query
async fn cmd_suggest(config: &Config, query: &str, source: Option<&str>) -> Result<()> {
    let source = source
        .or(config.places.source.as_deref())
        .ok_or_else(|| eyre!("No place dataset configured. Pass --source or set places.source"))?;

    let places = load_places(source).await?;
    for label in config.matcher().matches(query, &places) {
        println!("{}", label);
    }
    Ok(())
}

/// Launch the TUI
async fn cmd_tui(config: &Config, lang: Language) -> Result<()> {
    config.validate()?;
    let client = llm::create_client(&config.llm)?;
    let prompts = prompt_builder(config);

    let (places, places_error) = match config.places.source.as_deref() {
        Some(source) => match load_places(source).await {
            Ok(places) => (places, false),
            Err(e) => {
                warn!(error = %e, "Place dataset unavailable; autocomplete disabled");
                (Vec::new(), true)
            }
        },
        None => (Vec::new(), false),
    };

    let services = tui::Services {
        planner: Arc::new(ItineraryPlanner::from_config(client.clone(), prompts.clone(), &config.llm)),
        info: Arc::new(LocationInfoClient::from_config(client, prompts, &config.llm)),
        coords: geo::locate(&config.geo).await,
    };

    let mut state = tui::AppState::new(lang, config.matcher(), config.validator(), places);
    if places_error {
        state.set_notice(Messages::for_language(lang).places_error);
    }

    tui::run(state, services).await
}

/// Print the effective configuration
fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", serde_yaml::to_string(config).context("Failed to serialize config")?);
    Ok(())
}
