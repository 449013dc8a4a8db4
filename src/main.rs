use clap::Parser;
use hsa_client::application::workflow::Workflow;
use hsa_client::config::Settings;
use hsa_client::domain::ports::BankingApiBox;
use hsa_client::infrastructure::http::HttpBankingApi;
use hsa_client::interfaces::console::session::Console;
use hsa_client::telemetry::init_telemetry;
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML settings file. Defaults to ./hsa-client.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root of the backend API, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    base_url: Option<String>,

    /// Log filter used when RUST_LOG is unset (logs go to stderr)
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())
        .and_then(|settings| settings.with_overrides(cli.base_url, cli.log_filter))
        .into_diagnostic()?;
    init_telemetry(&settings.log_filter);
    info!(base_url = %settings.base_url, "starting console");

    let api: BankingApiBox = Box::new(HttpBankingApi::new(settings.base_url).into_diagnostic()?);
    let mut console = Console::new(Workflow::new(api), io::stdout());

    // Commands are read from stdin, one per line.
    let stdin = BufReader::new(tokio::io::stdin());
    console.run(stdin).await.into_diagnostic()?;

    Ok(())
}
