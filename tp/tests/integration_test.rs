//! Integration tests for the trip planner
//!
//! Library flows run against a scripted in-process client; CLI tests run the
//! `tp` binary on paths that never reach the network.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use async_trait::async_trait;
use predicates::prelude::*;
use tempfile::TempDir;

use tripplanner::domain::{MapsSource, WebSource};
use tripplanner::export;
use tripplanner::llm::{GenerateRequest, GenerateResponse, GenerativeClient, LlmError};
use tripplanner::planner::{InfoPanel, PanelAction, PanelState};
use tripplanner::{
    GroundingChunk, ItineraryGenerationError, ItineraryPlanner, Language, LocationInfoClient, PreferencesValidator,
    PromptBuilder, TripPreferences,
};

// =============================================================================
// Scripted client
// =============================================================================

struct ScriptedClient {
    replies: Mutex<VecDeque<GenerateResponse>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedClient {
    fn new(replies: Vec<GenerateResponse>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::InvalidResponse("script exhausted".to_string()))
    }
}

const ITINERARY_JSON: &str = r#"{
  "itinerary": [
    {
      "day": 1,
      "title": "Alfama and the castle",
      "activities": [
        {"time": "09:00", "description": "Climb to São Jorge Castle", "estimatedCost": "15 EUR",
         "location": {"name": "Castelo de São Jorge", "latitude": 38.7139, "longitude": -9.1334}},
        {"time": "13:00", "description": "Lunch with a \"view\"", "estimatedCost": "25 EUR",
         "location": {"name": "Miradouro de Santa Luzia", "latitude": 38.7118, "longitude": -9.1302}}
      ]
    },
    {
      "day": 2,
      "title": "Belém",
      "activities": [
        {"time": "10:00", "description": "Jerónimos Monastery", "estimatedCost": "10 EUR",
         "location": {"name": "Mosteiro dos Jerónimos", "latitude": 38.6979, "longitude": -9.2068}}
      ]
    }
  ],
  "justification": {
    "interestsAlignment": "History and food throughout",
    "budgetAlignment": "Well under 800 EUR",
    "restrictionsAlignment": "Vegetarian options at every meal"
  }
}"#;

fn lisbon_prefs() -> TripPreferences {
    let mut prefs = TripPreferences::new("Lisbon, Lisbon, Portugal", Some(2), "800", "Vegetarian");
    prefs.add_interest("History");
    prefs.add_interest("Food");
    prefs
}

// =============================================================================
// Library flows
// =============================================================================

#[tokio::test]
async fn test_validate_plan_and_export() {
    let prefs = lisbon_prefs();
    assert!(PreferencesValidator::default().validate(&prefs).is_empty());

    let client = ScriptedClient::new(vec![GenerateResponse::text(ITINERARY_JSON)]);
    let planner = ItineraryPlanner::new(client.clone(), Arc::new(PromptBuilder::embedded_only()), "gemini-2.5-pro");

    let itinerary = planner.request_itinerary(&prefs, Language::En).await.unwrap();
    assert_eq!(itinerary.itinerary.len(), 2);
    assert_eq!(itinerary.activity_count(), 3);
    assert_eq!(client.calls(), 1);

    let csv = export::to_csv(&itinerary, Language::En).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2], r#"1,"13:00","Lunch with a ""view""","25 EUR","Miradouro de Santa Luzia""#);
}

#[tokio::test]
async fn test_prompt_carries_preferences_and_language() {
    let client = ScriptedClient::new(vec![GenerateResponse::text(ITINERARY_JSON)]);
    let planner = ItineraryPlanner::new(client.clone(), Arc::new(PromptBuilder::embedded_only()), "m");

    planner.request_itinerary(&lisbon_prefs(), Language::Es).await.unwrap();

    let request = client.requests.lock().unwrap()[0].clone();
    assert!(request.prompt.contains("Lisbon, Lisbon, Portugal"));
    assert!(request.prompt.contains("History, Food"));
    assert!(request.prompt.contains("Vegetarian"));
    assert!(request.prompt.contains("Spanish"));
    assert!(request.response_schema.is_some());
}

#[tokio::test]
async fn test_truncated_json_fails_closed() {
    let cut = ITINERARY_JSON.find("\"day\": 2").expect("second day present");
    let truncated = &ITINERARY_JSON[..cut];
    let client = ScriptedClient::new(vec![GenerateResponse::text(truncated)]);
    let planner = ItineraryPlanner::new(client.clone(), Arc::new(PromptBuilder::embedded_only()), "m");

    let err = planner.request_itinerary(&lisbon_prefs(), Language::En).await.unwrap_err();
    assert!(matches!(err, ItineraryGenerationError::SchemaViolation(_)));
    assert!(!err.user_message(Language::En).contains("EOF"));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_info_panel_flow() {
    let chunks = vec![
        GroundingChunk {
            web: Some(WebSource {
                uri: "https://example.org/castelo".to_string(),
                title: "Castle tickets".to_string(),
            }),
            maps: None,
        },
        GroundingChunk {
            web: None,
            maps: Some(MapsSource {
                uri: "https://maps.google.com/?cid=1".to_string(),
                title: "Castelo de São Jorge".to_string(),
                place_answer_sources: None,
            }),
        },
    ];
    let answer = GenerateResponse {
        grounding_chunks: chunks.clone(),
        ..GenerateResponse::text("Open 9:00-21:00.")
    };
    let client = ScriptedClient::new(vec![answer, GenerateResponse::text("Open 9:00-18:00 in winter.")]);
    let info = LocationInfoClient::new(client.clone(), Arc::new(PromptBuilder::embedded_only()), "gemini-2.5-flash");

    let mut panel = InfoPanel::new();
    assert_eq!(panel.toggle(), PanelAction::Fetch);
    let result = info
        .request_location_info("Castelo de São Jorge", "Lisbon", None, Language::En)
        .await;
    panel.finish(result, Language::En);
    match panel.state() {
        PanelState::Loaded { text, chunks: got } => {
            assert_eq!(text, "Open 9:00-21:00.");
            assert_eq!(got, &chunks);
            assert!(got[1].is_maps());
        }
        other => panic!("unexpected state {:?}", other),
    }

    // Close then reopen: a fresh request
    assert_eq!(panel.toggle(), PanelAction::None);
    assert_eq!(panel.toggle(), PanelAction::Fetch);
    let result = info
        .request_location_info("Castelo de São Jorge", "Lisbon", None, Language::En)
        .await;
    panel.finish(result, Language::En);
    assert_eq!(client.calls(), 2);
}

// =============================================================================
// CLI smoke tests
// =============================================================================

struct CliEnv {
    dir: TempDir,
}

impl CliEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("config.yml"), "language: en\n").expect("Failed to write config");
        Self { dir }
    }

    fn places_file(&self) -> String {
        let path = self.dir.path().join("places.json");
        let mut file = std::fs::File::create(&path).expect("Failed to create places file");
        write!(
            file,
            r#"[
                {{"name": "Paris", "country": "France", "subcountry": "Île-de-France"}},
                {{"name": "Parma", "country": "Italy", "subcountry": "Emilia-Romagna"}},
                {{"name": "Lima", "country": "Peru", "subcountry": null}}
            ]"#
        )
        .expect("Failed to write places file");
        path.display().to_string()
    }

    fn tp(&self) -> Command {
        let mut cmd = Command::cargo_bin("tp").expect("binary built");
        cmd.current_dir(self.dir.path())
            .env("XDG_DATA_HOME", self.dir.path())
            .env("HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("GEMINI_API_KEY")
            .arg("--config")
            .arg(self.dir.path().join("config.yml"));
        cmd
    }
}

#[test]
fn test_cli_version() {
    let env = CliEnv::new();
    env.tp().arg("--version").assert().success().stdout(predicate::str::starts_with("tp "));
}

#[test]
fn test_cli_suggest_from_file() {
    let env = CliEnv::new();
    let source = env.places_file();

    env.tp()
        .args(["suggest", "PAR", "--source", &source])
        .assert()
        .success()
        .stdout("Paris, Île-de-France, France\nParma, Emilia-Romagna, Italy\n");
}

#[test]
fn test_cli_suggest_from_bundled_dataset() {
    let env = CliEnv::new();
    let source = concat!(env!("CARGO_MANIFEST_DIR"), "/data/places.json");

    env.tp()
        .args(["suggest", "san", "--source", source])
        .assert()
        .success()
        .stdout("San Francisco, California, United States\nSantiago, Santiago Metropolitan, Chile\n");
}

#[test]
fn test_cli_suggest_short_query_prints_nothing() {
    let env = CliEnv::new();
    let source = env.places_file();

    env.tp()
        .args(["suggest", "p", "--source", &source])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_cli_suggest_without_source_fails() {
    let env = CliEnv::new();
    env.tp()
        .args(["suggest", "paris"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No place dataset configured"));
}

#[test]
fn test_cli_plan_validation_errors() {
    let env = CliEnv::new();
    env.tp()
        .args(["plan", "--destination", " ", "--budget", "5", "--duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("This field is required"))
        .stderr(predicate::str::contains("Please enter a positive number"))
        .stderr(predicate::str::contains("Budget must be a number greater than 10"))
        .stderr(predicate::str::contains("GEMINI_API_KEY").not());
}

#[test]
fn test_cli_plan_validation_in_spanish() {
    let env = CliEnv::new();
    env.tp()
        .args(["--lang", "es", "plan", "--destination", "Roma", "--budget", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("El presupuesto debe ser un número mayor a 10"));
}

#[test]
fn test_cli_plan_missing_api_key() {
    let env = CliEnv::new();
    env.tp()
        .args(["plan", "--destination", "Paris", "--budget", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_cli_info_missing_api_key() {
    let env = CliEnv::new();
    env.tp()
        .args(["info", "--place", "Louvre", "--destination", "Paris"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_cli_config_prints_effective_config() {
    let env = CliEnv::new();
    env.tp()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("itinerary-model: gemini-2.5-pro"))
        .stdout(predicate::str::contains("max-results: 7"))
        .stdout(predicate::str::contains("budget-min: 10"));
}
