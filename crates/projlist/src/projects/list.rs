use crate::prelude::{println, *};
use colored::Colorize;
use projlist_core::filters::{build_filters, FilterDraft};
use projlist_core::pagination::{compute_window, PageEntry};
use projlist_core::projects::{transform_projects, ListOutput};
use projlist_core::query::{self, QueryState, SortColumn, SortSpec};

use super::{create_client, fetch_projects};

/// Slot budget for the page-number bar.
const MAX_PAGE_BUTTONS: usize = 7;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # First page with default page size:
  projlist projects list

  # Third page, 20 projects per page:
  projlist projects list --page 3 --limit 20

  # Highest interest first:
  projlist projects list --sort basic_interest --desc

  # Baltic projects rated A or better, 6 to 24 month duration:
  projlist projects list --country lt --country lv --country ee \\
      --rating AAA --rating AA --rating A --duration-min 6 --duration-max 24

  # Replay a listing URL's query string verbatim:
  projlist projects list --query 'page=2&sort[]=%7B%22id%22%3A%22basic_interest%22%2C%22desc%22%3Atrue%7D'

  # Machine-readable output:
  projlist projects list --json

NOTES:
  - Sort columns: basic_interest, initial_rating, credit_duration
  - Country and rating filters are repeatable and combine as a multi-select
  - --query takes a raw query string and overrides every other flag")]
pub struct ListOptions {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of projects per page
    #[arg(short, long, env = "PROJLIST_LIMIT", default_value = "10")]
    pub limit: usize,

    /// Sort column: basic_interest, initial_rating, credit_duration
    #[arg(short, long)]
    pub sort: Option<SortColumn>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Filter by country code (repeatable)
    #[arg(long = "country", value_name = "CODE")]
    pub countries: Vec<String>,

    /// Filter by initial rating grade (repeatable)
    #[arg(long = "rating", value_name = "GRADE")]
    pub ratings: Vec<String>,

    /// Filter by investment purpose
    #[arg(long)]
    pub purpose: Option<String>,

    /// Minimum credit duration in months
    #[arg(long, value_name = "MONTHS")]
    pub duration_min: Option<u32>,

    /// Maximum credit duration in months
    #[arg(long, value_name = "MONTHS")]
    pub duration_max: Option<u32>,

    /// Filter by campaign id
    #[arg(long, value_name = "ID")]
    pub campaign_id: Option<String>,

    /// Filter by private access id
    #[arg(long, value_name = "ID")]
    pub private_id: Option<String>,

    /// Raw query string to replay, e.g. copied from a listing URL; overrides the flags above
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let state = listing_state(&options);

    if global.verbose {
        let encoded = query::encode(&state);
        if encoded.is_empty() {
            println!("Fetching projects with default parameters...");
        } else {
            println!("Fetching projects: ?{}", encoded);
        }
    }

    let output = list_projects_data(&state, &global.api_base).await?;

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output)?;
    }

    Ok(())
}

/// Resolve the CLI flags, or a replayed query string, into listing state.
fn listing_state(options: &ListOptions) -> QueryState {
    if let Some(raw) = &options.query {
        return query::decode(raw);
    }

    let draft = FilterDraft {
        countries: options.countries.clone(),
        ratings: options.ratings.clone(),
        purpose: options.purpose.clone().unwrap_or_default(),
        credit_duration_min: options
            .duration_min
            .map(|n| n.to_string())
            .unwrap_or_default(),
        credit_duration_max: options
            .duration_max
            .map(|n| n.to_string())
            .unwrap_or_default(),
        campaign_id: options.campaign_id.clone().unwrap_or_default(),
        private_id: options.private_id.clone().unwrap_or_default(),
    };

    let sort = options
        .sort
        .map(|id| {
            vec![SortSpec {
                id,
                desc: options.desc,
            }]
        })
        .unwrap_or_default();

    QueryState {
        page: options.page,
        limit: options.limit,
        sort,
        filters: build_filters(&draft),
    }
}

/// Fetches project listing data and returns it as a structured ListOutput
pub async fn list_projects_data(state: &QueryState, api_base: &str) -> Result<ListOutput> {
    let client = create_client()?;
    let response = fetch_projects(&client, api_base, state).await?;

    Ok(transform_projects(response))
}

/// Convert list output to JSON string
fn format_projects_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Render the page-number bar, e.g. `1 ... 9 [10] 11 ... 20`.
fn format_page_bar(current_page: usize, last_page: usize) -> String {
    compute_window(current_page, last_page, MAX_PAGE_BUTTONS)
        .iter()
        .map(|entry| match entry {
            PageEntry::Page(n) if *n == current_page => {
                f!("[{n}]").bright_cyan().bold().to_string()
            }
            PageEntry::Page(n) => n.to_string(),
            PageEntry::Ellipsis => "...".bright_black().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert list output to formatted text with colors
fn format_projects_text(output: &ListOutput) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    // Header
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!(
            "INVESTMENT PROJECTS (Page {} of {})",
            pagination.current_page,
            pagination.last_page
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if output.items.is_empty() {
        result.push_str(&f!(
            "\n{}\n",
            "No projects match the current filters.".yellow()
        ));
    } else {
        let mut table = crate::prelude::new_table();
        table.add_row(prettytable::row![
            "PID", "Project", "Country", "Rating", "Interest", "Duration", "Funded", "Progress",
            "Investors", "Status"
        ]);

        for item in &output.items {
            table.add_row(prettytable::row![
                item.pid,
                item.name,
                item.country
                    .as_deref()
                    .map(|c| c.to_uppercase())
                    .unwrap_or_else(|| "—".to_string()),
                item.rating,
                item.interest,
                item.duration,
                f!("{} / {}", item.invested, item.required),
                f!("{:.0}%", item.progress_pct),
                item.investors,
                item.status.label()
            ]);
        }

        result.push('\n');
        result.push_str(&table.to_string());
    }

    // Pagination section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&f!("{}\n", "PAGES".bright_yellow().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&f!(
        "\n  {}\n",
        format_page_bar(pagination.current_page, pagination.last_page)
    ));

    match (pagination.from, pagination.to) {
        (Some(from), Some(to)) => {
            result.push_str(&f!(
                "\n{} {}-{} {} {} {}\n",
                "Showing".bright_white(),
                from.to_string().bright_cyan().bold(),
                to.to_string().bright_cyan().bold(),
                "of".bright_white(),
                pagination.total.to_string().bright_cyan().bold(),
                "projects".bright_white()
            ));
        }
        _ => {
            result.push_str(&f!(
                "\n{} {} {}\n",
                "Total:".bright_white(),
                pagination.total.to_string().bright_cyan().bold(),
                "projects".bright_white()
            ));
        }
    }

    result.push_str(&f!("\n{}:\n", "To navigate".bright_white().bold()));
    if let Some(next) = &pagination.next_page_command {
        result.push_str(&f!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &pagination.prev_page_command {
        result.push_str(&f!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }
    if pagination.current_page == pagination.last_page && pagination.current_page > 1 {
        result.push_str(&f!(
            "  {}: {}\n",
            "First page".green(),
            "projlist projects list --page 1".cyan()
        ));
    }

    result.push_str(&f!("\n{}:\n", "To change page size".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        "projlist projects list --limit <number>".cyan()
    ));

    result.push_str(&f!("\n{}:\n", "To filter and sort".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        "projlist projects list --country lt --rating A+ --sort basic_interest --desc".cyan()
    ));
    result.push_str(&f!(
        "  {}: {}\n",
        "Catalog".green(),
        "projlist projects filters".cyan()
    ));

    result.push_str(&f!("\n{}:\n", "To get JSON output".bright_white().bold()));
    result.push_str(&f!("  {}\n", "projlist projects list --json".cyan()));

    result.push('\n');
    result
}

fn output_json(output: &ListOutput) -> Result<()> {
    let json = format_projects_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &ListOutput) -> Result<()> {
    let formatted = format_projects_text(output);
    print!("{}", formatted);
    Ok(())
}
