use clap::Parser;
use nt_core::{PurposeResolver, Result};
use nt_inference::{InferenceConfig, ModelKind};
use nt_scrappers::cli::{handle_command, TrendCommands};
use nt_scrappers::{HttpFetcher, PipelineConfig, SearchConfig, TrendManager, DEFAULT_MAX_ARTICLES};
use nt_web::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyword news trend digests", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, env = "NT_MODEL", default_value_t = ModelKind::Openai)]
    model: ModelKind,
    /// Model identifier, e.g. gpt-4o
    #[arg(long, env = "NT_MODEL_NAME")]
    model_name: Option<String>,
    /// Base URL of the model API
    #[arg(long, env = "NT_MODEL_URL")]
    model_url: Option<String>,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,
    #[arg(long, default_value_t = DEFAULT_MAX_ARTICLES as u64, value_parser = clap::value_parser!(u64).range(1..))]
    max_articles: u64,
    /// Articles processed at the same time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    concurrency: u64,
    /// Timeout in seconds for page fetches and model calls
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    /// JSON file with `[{"trigger", "purpose"}]` rules replacing the built-in table
    #[arg(long, env = "NT_RULES")]
    rules: Option<PathBuf>,
    #[arg(long, default_value = nt_scrappers::search::DEFAULT_SEARCH_URL)]
    search_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "NT_ADDR", default_value = "0.0.0.0:8000")]
        addr: String,
    },
    #[command(flatten)]
    Pipeline(TrendCommands),
}

fn load_resolver(cli: &Cli) -> Result<PurposeResolver> {
    match &cli.rules {
        Some(path) => PurposeResolver::from_json_file(path),
        None => Ok(PurposeResolver::default()),
    }
}

fn build_manager(cli: &Cli, resolver: PurposeResolver) -> Result<TrendManager> {
    let timeout = Duration::from_secs(cli.timeout);

    let inference = nt_inference::create_model(&InferenceConfig {
        kind: cli.model,
        model_name: cli.model_name.clone(),
        base_url: cli.model_url.clone(),
        api_key: cli.api_key.clone(),
        temperature: cli.temperature,
        timeout,
    })?;

    let config = PipelineConfig {
        max_articles: cli.max_articles as usize,
        concurrency: cli.concurrency as usize,
        model_timeout: timeout,
        search: SearchConfig {
            search_url: cli.search_url.clone(),
            ..Default::default()
        },
    };

    let manager = TrendManager::new(Arc::new(HttpFetcher::new(timeout)?), inference, resolver, config)?;
    info!(
        model = manager.model_name(),
        max_articles = cli.max_articles,
        concurrency = cli.concurrency,
        "🦗 Trend pipeline initialized"
    );
    Ok(manager)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    nt_scrappers::init_logging("info");
    let cli = Cli::parse();
    let resolver = load_resolver(&cli)?;

    match &cli.command {
        Commands::Serve { addr } => {
            let manager = build_manager(&cli, resolver)?;
            nt_web::serve(AppState::new(manager), addr).await?
        }
        Commands::Pipeline(command) => {
            handle_command(command.clone(), resolver, |resolver| build_manager(&cli, resolver)).await?
        }
    }

    Ok(())
}
