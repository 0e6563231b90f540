//! Grounding citations returned with a place info answer

use serde::{Deserialize, Deserializer, Serialize};

/// One citation the model used; either a web page or a maps place
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapsSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_answer_sources: Option<Vec<PlaceAnswerSource>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAnswerSource {
    #[serde(default)]
    pub review_snippets: Vec<ReviewSnippet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSnippet {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub text: String,
}

impl GroundingChunk {
    /// Link target, preferring the web source
    pub fn uri(&self) -> Option<&str> {
        self.web
            .as_ref()
            .map(|w| w.uri.as_str())
            .or_else(|| self.maps.as_ref().map(|m| m.uri.as_str()))
            .filter(|u| !u.is_empty())
    }

    /// Title to show, if the source had one
    pub fn title(&self) -> Option<&str> {
        self.web
            .as_ref()
            .map(|w| w.title.as_str())
            .or_else(|| self.maps.as_ref().map(|m| m.title.as_str()))
            .filter(|t| !t.is_empty())
    }

    pub fn is_maps(&self) -> bool {
        self.web.is_none() && self.maps.is_some()
    }
}

/// Accept `placeAnswerSources` as either one object or a list of them
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<PlaceAnswerSource>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PlaceAnswerSource),
        Many(Vec<PlaceAnswerSource>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(source)) => Some(vec![source]),
        Some(OneOrMany::Many(sources)) => Some(sources),
    })
}
