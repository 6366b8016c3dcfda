use crate::prelude::*;
use clap::Parser;

mod error;
mod prelude;
mod projects;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse paginated investment project listings from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the project listing API
    #[clap(
        long,
        env = "PROJLIST_API_BASE",
        global = true,
        default_value = "https://api.profitus.com/api/v1"
    )]
    api_base: String,

    /// Whether to display additional information.
    #[clap(long, env = "PROJLIST_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Investment project listing operations
    Projects(crate::projects::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Projects(sub_app) => crate::projects::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
