//! Loading the place dataset
//!
//! The dataset is a JSON array of `{name, country, subcountry}` objects,
//! read once per session from a local file or an http(s) URL.

use std::path::Path;

use eyre::{Context, Result};
use tracing::{debug, info};

use super::PlaceRecord;

/// Parse a JSON array of place records
pub fn parse_places(content: &str) -> Result<Vec<PlaceRecord>> {
    let places: Vec<PlaceRecord> = serde_json::from_str(content).context("Failed to parse place dataset")?;
    Ok(places)
}

/// Load places from a file path or an http(s) URL
pub async fn load_places(source: &str) -> Result<Vec<PlaceRecord>> {
    debug!(%source, "load_places: called");

    let places = if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source)
            .await
            .context(format!("Failed to fetch place dataset from {}", source))?
            .error_for_status()
            .context("Place dataset request failed")?;
        let content = response.text().await.context("Failed to read place dataset body")?;
        parse_places(&content)?
    } else {
        let path = expand_home(source);
        let content = tokio::fs::read_to_string(&path)
            .await
            .context(format!("Failed to read place dataset {}", path.display()))?;
        parse_places(&content)?
    };

    info!(count = places.len(), %source, "Loaded place dataset");
    Ok(places)
}

fn expand_home(source: &str) -> std::path::PathBuf {
    match source.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| Path::new(source).to_path_buf()),
        None => Path::new(source).to_path_buf(),
    }
}
