use crate::prelude::{println, *};
use colored::Colorize;
use projlist_core::accordion;
use projlist_core::filters::{
    active_sections, parse_draft, FilterDraft, COUNTRY_OPTIONS, PURPOSE_OPTIONS, RATING_OPTIONS,
    SECTION_TITLES,
};
use projlist_core::query;
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Show the filter catalog with the saved panel state:
  projlist projects filters

  # Keep the country and duration sections expanded:
  projlist projects filters --expand 0 --expand 3

  # Forget the saved panel state:
  projlist projects filters --reset

  # See which sections a listing URL's filters touch:
  projlist projects filters --query 'filters[]=%7B%22id%22%3A%22country%22%2C%22value%22%3A%5B%22lt%22%5D%7D'

NOTES:
  - Sections are numbered 0-5 in catalog order
  - The expansion state is stored in the projlist config directory")]
pub struct PanelOptions {
    /// Mark a section as expanded and remember the choice (repeatable)
    #[arg(long = "expand", value_name = "SECTION")]
    pub expand: Vec<usize>,

    /// Forget the saved panel state
    #[arg(long)]
    pub reset: bool,

    /// Expand the sections touched by a listing query string's filters
    /// instead of the saved state
    #[arg(long, value_name = "QUERY", conflicts_with_all = ["expand", "reset"])]
    pub query: Option<String>,

    /// Output the filter catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: PanelOptions, global: crate::Global) -> Result<()> {
    let state_dir = panel_state_dir()?;

    if global.verbose {
        println!("Panel state directory: {}", state_dir.display());
        println!();
    }

    if options.reset {
        accordion::clear_state(&state_dir)
            .map_err(|e| eyre!("Failed to clear panel state: {}", e))?;
        println!("Filter panel state cleared.");
        return Ok(());
    }

    if !options.expand.is_empty() {
        let sections = normalize_sections(&options.expand)?;
        accordion::save_state(&state_dir, &sections)
            .map_err(|e| eyre!("Failed to save panel state: {}", e))?;
    }

    let expanded = match &options.query {
        Some(raw) => active_sections(&parse_draft(&query::decode(raw).filters)),
        None => accordion::load_state(&state_dir)
            .map_err(|e| eyre!("Failed to load panel state: {}", e))?
            .unwrap_or_else(|| active_sections(&FilterDraft::default())),
    };

    if options.json {
        println!("{}", format_catalog_json(&expanded)?);
    } else {
        print!("{}", format_catalog_text(&expanded));
    }

    Ok(())
}

/// Directory holding the persisted panel state.
fn panel_state_dir() -> Result<PathBuf> {
    let config_dir = dirs_next::config_dir()
        .ok_or_eyre("Unable to determine the configuration directory")?;

    Ok(config_dir.join("projlist"))
}

/// Validate and canonicalize a set of section indices: sorted, deduplicated,
/// all within the catalog.
fn normalize_sections(sections: &[usize]) -> Result<Vec<usize>> {
    let mut normalized: Vec<usize> = sections.to_vec();
    normalized.sort_unstable();
    normalized.dedup();

    if let Some(out_of_range) = normalized.iter().find(|s| **s >= SECTION_TITLES.len()) {
        return Err(eyre!(
            "Invalid section {}. Sections are numbered 0-{}",
            out_of_range,
            SECTION_TITLES.len() - 1
        ));
    }

    Ok(normalized)
}

fn section_options(section: usize) -> Vec<String> {
    match section {
        0 => COUNTRY_OPTIONS
            .iter()
            .map(|(code, label)| f!("{code} - {label}"))
            .collect(),
        1 => RATING_OPTIONS.iter().map(|grade| grade.to_string()).collect(),
        2 => PURPOSE_OPTIONS
            .iter()
            .map(|(value, label)| f!("{value} - {label}"))
            .collect(),
        3 => vec![
            "--duration-min <MONTHS>".to_string(),
            "--duration-max <MONTHS>".to_string(),
        ],
        4 => vec!["--campaign-id <ID>".to_string()],
        5 => vec!["--private-id <ID>".to_string()],
        _ => Vec::new(),
    }
}

fn format_catalog_json(expanded: &[usize]) -> Result<String> {
    let sections: Vec<serde_json::Value> = SECTION_TITLES
        .iter()
        .enumerate()
        .map(|(index, title)| {
            serde_json::json!({
                "index": index,
                "title": title,
                "expanded": expanded.contains(&index),
                "options": section_options(index),
            })
        })
        .collect();

    serde_json::to_string_pretty(&serde_json::json!({ "sections": sections }))
        .map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_catalog_text(expanded: &[usize]) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "PROJECT FILTERS".bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    for (index, title) in SECTION_TITLES.iter().enumerate() {
        let is_expanded = expanded.contains(&index);
        let marker = if is_expanded { "v" } else { ">" };

        result.push_str(&f!(
            "\n{} {} {}\n",
            marker.bright_yellow().bold(),
            f!("[{index}]").yellow(),
            title.bright_white().bold()
        ));

        if is_expanded {
            for option in section_options(index) {
                result.push_str(&f!("    {}\n", option.cyan()));
            }
        }
    }

    result.push_str(&f!(
        "\n{}: {}\n",
        "To expand sections".bright_white().bold(),
        "projlist projects filters --expand <section>".cyan()
    ));
    result.push_str(&f!(
        "{}: {}\n",
        "To reset".bright_white().bold(),
        "projlist projects filters --reset".cyan()
    ));

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sections_sorts_and_dedupes() {
        let normalized = normalize_sections(&[5, 0, 3, 0]).unwrap();
        assert_eq!(normalized, vec![0, 3, 5]);
    }

    #[test]
    fn test_normalize_sections_rejects_out_of_range() {
        assert!(normalize_sections(&[6]).is_err());
    }

    #[test]
    fn test_section_options_cover_all_sections() {
        for index in 0..SECTION_TITLES.len() {
            assert!(!section_options(index).is_empty(), "section {index}");
        }
    }

    #[test]
    fn test_format_catalog_text_marks_expansion() {
        let text = format_catalog_text(&[0]);

        assert!(text.contains("PROJECT FILTERS"));
        assert!(text.contains("Country"));
        assert!(text.contains("lt - Lithuania"));
        // Collapsed sections hide their options.
        assert!(!text.contains("AAA"));
    }

    #[test]
    fn test_format_catalog_json_structure() {
        let json = format_catalog_json(&[0, 1]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let sections = parsed["sections"].as_array().unwrap();
        assert_eq!(sections.len(), SECTION_TITLES.len());
        assert_eq!(sections[0]["expanded"], true);
        assert_eq!(sections[2]["expanded"], false);
        assert_eq!(sections[1]["title"], "Initial rating");
    }
}
