//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Coordinates, Language, TripPreferences};

/// Trip Planner - AI-assisted travel itineraries
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan trips with a generative model: itineraries, place info and destination search",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/tripplanner/logs/tripplanner.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Output language (en, es); overrides the config file
    #[arg(short, long, global = true)]
    pub lang: Option<Language>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate an itinerary
    Plan {
        /// Where to go, e.g. "Tokyo, Japan"
        #[arg(short, long)]
        destination: String,

        /// Trip length in days
        #[arg(short = 'n', long, default_value = "7", allow_hyphen_values = true)]
        duration: i64,

        /// Budget per person
        #[arg(short, long)]
        budget: String,

        /// Interest tag; repeat for several (use "Other" with --other-interest)
        #[arg(short, long = "interest")]
        interests: Vec<String>,

        /// Free-text interest used when "Other" is selected
        #[arg(long)]
        other_interest: Option<String>,

        /// Restrictions or requirements, e.g. "vegetarian, wheelchair access"
        #[arg(short, long, default_value = "")]
        restrictions: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch up-to-date information about one place
    Info {
        /// Place name
        #[arg(short, long)]
        place: String,

        /// Destination the place belongs to
        #[arg(short, long)]
        destination: String,

        /// Bias results toward LAT,LON (overrides geo config)
        #[arg(long, allow_hyphen_values = true)]
        near: Option<Coordinates>,
    },

    /// Search the place dataset for destinations
    Suggest {
        /// Search text
        query: String,

        /// Place dataset file or URL (overrides places.source)
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Launch the interactive TUI
    Tui,

    /// Print the effective configuration
    Config,
}

impl Command {
    /// Build trip preferences from `plan` arguments
    pub fn to_preferences(&self) -> Option<TripPreferences> {
        let Command::Plan {
            destination,
            duration,
            budget,
            interests,
            other_interest,
            restrictions,
            ..
        } = self
        else {
            return None;
        };

        let mut prefs = TripPreferences::new(
            destination.clone(),
            Some(*duration),
            budget.clone(),
            restrictions.clone(),
        )
        .with_other_interest(other_interest.clone());
        for interest in interests {
            prefs.add_interest(interest.as_str());
        }
        Some(prefs)
    }
}

/// Output format for the plan command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown format: {}. Use: text, json, or csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
