//! Prompt builder
//!
//! Renders trip preferences into the instruction sent to the model. The
//! output is a pure function of the preferences, the language and the
//! template in use.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::domain::{Language, TripPreferences};

/// Delimiter between interests in the rendered prompt
const INTEREST_DELIMITER: &str = ", ";

/// Substituted when the user gave no restrictions
const NO_RESTRICTIONS: &str = "None";

/// Substituted when the user picked no interests
const NO_INTERESTS: &str = "None specified";

/// Context for the itinerary template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryPromptContext {
    pub language: String,
    pub destination: String,
    pub duration: i64,
    pub budget: String,
    pub interests: String,
    pub restrictions: String,
}

impl ItineraryPromptContext {
    pub fn new(prefs: &TripPreferences, lang: Language) -> Self {
        let interests = prefs.effective_interests();
        let restrictions = prefs.restrictions.trim();

        Self {
            language: lang.instruction_name().to_string(),
            destination: prefs.destination.trim().to_string(),
            duration: prefs.duration.unwrap_or_default(),
            budget: prefs.budget.trim().to_string(),
            interests: if interests.is_empty() {
                NO_INTERESTS.to_string()
            } else {
                interests.join(INTEREST_DELIMITER)
            },
            restrictions: if restrictions.is_empty() {
                NO_RESTRICTIONS.to_string()
            } else {
                restrictions.to_string()
            },
        }
    }
}

/// Context for the place info template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationInfoPromptContext {
    pub language: String,
    pub place: String,
    pub destination: String,
}

/// Loads and renders prompt templates
pub struct PromptBuilder {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory searched for `{name}.hbs`
    override_dir: Option<PathBuf>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::embedded_only()
    }
}

impl PromptBuilder {
    /// Create a builder that checks `dir` before the embedded templates
    pub fn new(dir: Option<&Path>) -> Self {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.set_strict_mode(true);

        Self {
            hbs,
            override_dir: dir.filter(|d| d.exists()).map(Path::to_path_buf),
        }
    }

    /// Create a builder that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self::new(None)
    }

    /// Load a template by name
    ///
    /// Checks the override directory first, then the embedded defaults.
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.hbs", name));
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        let template = self.load_template(name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", name, e))
    }

    /// Render the itinerary instruction for `prefs` in `lang`
    pub fn build_itinerary(&self, prefs: &TripPreferences, lang: Language) -> Result<String> {
        debug!(destination = %prefs.destination, %lang, "build_itinerary: called");
        self.render("itinerary", &ItineraryPromptContext::new(prefs, lang))
    }

    /// Render the grounded info query for one place
    pub fn build_location_info(&self, place: &str, destination: &str, lang: Language) -> Result<String> {
        debug!(%place, %destination, %lang, "build_location_info: called");
        let context = LocationInfoPromptContext {
            language: lang.instruction_name().to_string(),
            place: place.to_string(),
            destination: destination.to_string(),
        };
        self.render("location-info", &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OTHER_INTEREST;

    fn prefs() -> TripPreferences {
        let mut prefs =
            TripPreferences::new("Kyoto, Japan", Some(5), "2500", "Vegetarian & <no> stairs");
        prefs.add_interest("History");
        prefs.add_interest("Food");
        prefs
    }

    #[test]
    fn test_build_itinerary_embeds_preferences() {
        let prompt = PromptBuilder::embedded_only()
            .build_itinerary(&prefs(), Language::En)
            .unwrap();

        assert!(prompt.contains("- Destination: Kyoto, Japan"));
        assert!(prompt.contains("- Duration: 5 days"));
        assert!(prompt.contains("- Budget: Approximately 2500"));
        assert!(prompt.contains("- Key Interests: History, Food"));
        assert!(prompt.contains("Vegetarian & <no> stairs"), "must not HTML-escape");
        assert!(prompt.contains("in English."));
        assert!(prompt.contains("Respond ONLY with a single valid JSON object"));
    }

    #[test]
    fn test_build_itinerary_language_directive() {
        let prompt = PromptBuilder::embedded_only()
            .build_itinerary(&prefs(), Language::Es)
            .unwrap();
        assert!(prompt.contains("in Spanish."));
    }

    #[test]
    fn test_empty_restrictions_placeholder() {
        let mut p = prefs();
        p.restrictions = "   ".to_string();
        let prompt = PromptBuilder::embedded_only().build_itinerary(&p, Language::En).unwrap();
        assert!(prompt.contains("- Specific Restrictions/Requirements: None\n"));
    }

    #[test]
    fn test_other_interest_substituted() {
        let mut p = prefs();
        p.add_interest(OTHER_INTEREST);
        p.other_interest = Some("Birding".to_string());
        let ctx = ItineraryPromptContext::new(&p, Language::En);
        assert_eq!(ctx.interests, "History, Food, Birding");
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = PromptBuilder::embedded_only();
        let a = builder.build_itinerary(&prefs(), Language::En).unwrap();
        let b = builder.build_itinerary(&prefs(), Language::En).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_location_info() {
        let prompt = PromptBuilder::embedded_only()
            .build_location_info("Fushimi Inari", "Kyoto", Language::Es)
            .unwrap();
        assert!(prompt.contains("\"Fushimi Inari\" in Kyoto"));
        assert!(prompt.contains("Respond entirely in Spanish."));
    }

    #[test]
    fn test_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("location-info.hbs"), "Tell me about {{place}} ({{language}})").unwrap();

        let builder = PromptBuilder::new(Some(dir.path()));
        let prompt = builder.build_location_info("Louvre", "Paris", Language::En).unwrap();
        assert_eq!(prompt, "Tell me about Louvre (English)");

        // Templates without an override still come from the embedded set
        assert!(builder.build_itinerary(&prefs(), Language::En).is_ok());
    }

    #[test]
    fn test_unknown_template() {
        let builder = PromptBuilder::embedded_only();
        assert!(builder.load_template("nonexistent-template").is_err());
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("location-info.hbs"), "{{nope}}").unwrap();
        let builder = PromptBuilder::new(Some(dir.path()));
        assert!(builder.build_location_info("a", "b", Language::En).is_err());
    }
}
