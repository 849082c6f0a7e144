use anyhow::Context;
use clap::Parser;
use mentor_core::JsonFileStore;
use mentor_llm::OpenAiProvider;
use mentor_server::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "mentor-server")]
#[command(about = "Personality-paired chat study server")]
#[command(version)]
struct Cli {
    /// Server port
    #[arg(long, env = "PORT", default_value = "9000")]
    port: u16,

    /// Directory for session documents
    #[arg(long, env = "DATA_DIR", default_value = "data/sessions")]
    data_dir: PathBuf,

    /// Completion API base URL
    #[arg(long, env = "LLM_BASE_URL", default_value = "https://api.openai.com/v1")]
    llm_base_url: String,

    /// Completion API key
    #[arg(long, env = "LLM_API_KEY")]
    api_key: String,

    /// Completion model name
    #[arg(long, env = "LLM_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Completion request timeout in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value = "60")]
    llm_timeout_secs: u64,

    /// Allowed CORS origin; permissive when unset
    #[arg(long, env = "CORS_ORIGIN")]
    cors_origin: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("starting mentor server on port {}", cli.port);
    log::info!("  data dir: {:?}", cli.data_dir);
    log::info!("  completion base URL: {}", cli.llm_base_url);
    log::info!("  completion model: {}", cli.model);

    let store = JsonFileStore::new(&cli.data_dir);
    store
        .init()
        .await
        .with_context(|| format!("failed to initialize session store at {:?}", cli.data_dir))?;

    let completions = OpenAiProvider::new(cli.api_key)
        .with_base_url(cli.llm_base_url)
        .with_model(cli.model)
        .with_timeout(Duration::from_secs(cli.llm_timeout_secs));

    let state = AppState::new(Arc::new(store), Arc::new(completions));

    mentor_server::server::run_server(state, cli.port, cli.cors_origin)
        .await
        .context("server terminated with an error")
}
