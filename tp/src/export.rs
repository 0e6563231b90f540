//! Itinerary export: CSV and a printable text rendering

use colored::Colorize;
use csv::{QuoteStyle, WriterBuilder};
use eyre::{Context, Result};
use tracing::debug;

use crate::domain::{Itinerary, Language};
use crate::locale::Messages;

/// Serialize `itinerary` as CSV, one row per activity
///
/// The header is localized. The day column is unquoted and every text
/// column is quoted with embedded quotes doubled.
pub fn to_csv(itinerary: &Itinerary, lang: Language) -> Result<String> {
    debug!(activities = itinerary.activity_count(), %lang, "to_csv: called");
    let messages = Messages::for_language(lang);

    // The header is written unquoted
    let mut out = messages.csv_header.join(",");
    out.push('\n');

    for (day, activity) in itinerary.activities() {
        out.push_str(&format!("{},", day.day));
        out.push_str(&quoted_row(&[
            activity.time.as_str(),
            activity.description.as_str(),
            activity.estimated_cost.as_str(),
            activity.location.name.as_str(),
        ])?);
    }

    Ok(out)
}

/// Text columns are always quoted, even when they look like numbers
fn quoted_row(fields: &[&str]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(fields).context("Failed to write CSV row")?;
    let row = writer.into_inner().map_err(|e| eyre::eyre!("Failed to flush CSV: {}", e))?;
    String::from_utf8(row).context("CSV output was not UTF-8")
}

/// Default file name for an exported itinerary
pub fn csv_file_name(destination: &str) -> String {
    let slug: String = destination
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if slug.is_empty() {
        "itinerary.csv".to_string()
    } else {
        format!("itinerary_{}.csv", slug)
    }
}

/// Printable plain-text rendering
///
/// Headings are colored when the terminal supports it; `colored` drops the
/// escapes on its own when output is not a tty.
pub fn render_text(itinerary: &Itinerary, destination: &str, lang: Language) -> String {
    debug!(%destination, %lang, "render_text: called");
    let messages = Messages::for_language(lang);
    let mut out = String::new();

    out.push_str(&format!("{} {}\n\n", messages.itinerary_title, destination).bold().to_string());

    out.push_str(&format!("{}\n", messages.justification_title.bold()));
    let justification = &itinerary.justification;
    for (heading, text) in [
        (messages.interests_heading, &justification.interests_alignment),
        (messages.budget_heading, &justification.budget_alignment),
        (messages.requirements_heading, &justification.restrictions_alignment),
    ] {
        out.push_str(&format!("  {}: {}\n", heading.cyan(), text));
    }

    for day in &itinerary.itinerary {
        out.push_str(&format!("\n{}\n", format!("{} {}: {}", messages.day, day.day, day.title).bold()));
        for activity in &day.activities {
            out.push_str(&format!(
                "  {}  {}\n",
                activity.time.yellow(),
                activity.description
            ));
            out.push_str(&format!(
                "         {} | {}\n",
                activity.estimated_cost.green(),
                activity.location.name
            ));
            out.push_str(&format!(
                "         {}: {}\n",
                messages.view_on_map,
                activity.location.map_url().dimmed()
            ));
        }
    }

    out
}
