use crate::prelude::{println, *};
use projlist_core::projects::ProjectsResponse;
use projlist_core::query::{self, QueryState};

pub mod filters;
pub mod list;

// Re-export public data functions
pub use list::list_projects_data;

#[derive(Debug, clap::Parser)]
#[command(name = "projects")]
#[command(about = "Investment project listing operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List investment projects as a table
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Show the filter catalog and the saved filter-panel state
    #[clap(name = "filters")]
    Filters(filters::PanelOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Projects API base: {}", global.api_base);
        println!();
    }

    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Filters(options) => filters::run(options, global).await,
    }
}

/// Build the HTTP client used for listing requests.
pub fn create_client() -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Fetch one page of projects for the given listing state.
pub async fn fetch_projects(
    client: &reqwest::Client,
    api_base: &str,
    state: &QueryState,
) -> Result<ProjectsResponse> {
    let base = api_base.trim_end_matches('/');
    let encoded = query::encode(state);
    let url = if encoded.is_empty() {
        f!("{base}/landing/projects")
    } else {
        f!("{base}/landing/projects?{encoded}")
    };

    log::debug!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!(crate::error::classify_fetch_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(eyre!(crate::error::classify_status(status.as_u16())));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse project listing response: {}", e))
}
