use analysis_core::llm::OpenAiVisionClient;
use analysis_core::Analyzer;
use anyhow::{Context, Result};
use clap::Parser;
use dashboard_server::config::{self, Args};
use dashboard_server::routes::{self, RouterOptions};
use dashboard_server::AppState;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    config::init_logging(&args)?;

    let history = config::load_history(&args)?;
    tracing::info!(incidents = history.len(), "loaded incident history");

    let analyzer = build_analyzer(&args)?;
    tracing::info!(mode = analyzer.mode_name(), "analyzer ready");

    let options = RouterOptions {
        ui_dir: Some(args.ui_dir.clone()),
        max_upload_bytes: args.max_upload_bytes,
    };
    let app = routes::dashboard_router(AppState::new(analyzer, history), options);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;

    tracing::info!(addr = %args.bind, ui_dir = %args.ui_dir.display(), "dashboard-server listening");
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}

fn build_analyzer(args: &Args) -> Result<Analyzer> {
    let mock = Analyzer::mock(Duration::from_millis(args.mock_delay_ms));
    if args.mock {
        return Ok(mock);
    }
    let Some(llm) = config::build_llm_config_from_env() else {
        tracing::warn!("no llm api key configured, serving mock analysis");
        return Ok(mock);
    };

    tracing::info!(provider = %llm.provider, model = %llm.model, "using llm for analysis");
    let client = OpenAiVisionClient::from_config(llm).context("build llm client")?;
    Ok(Analyzer::with_model(Arc::new(client)))
}
