use analysis_core::llm::LlmConfig;
use anyhow::{anyhow, Context, Result};
use incident_registry::IncidentRecord;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard-server")]
#[command(about = "Incident analysis dashboard: image analysis and incident history API")]
pub struct Args {
    /// Address to listen on.
    #[arg(long, env = "DASHBOARD_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Directory holding the built dashboard UI.
    #[arg(long, env = "DASHBOARD_UI_DIR", default_value = "dashboard-ui/dist")]
    pub ui_dir: PathBuf,

    /// JSON incident history to serve instead of the built-in mock data.
    #[arg(long, env = "DASHBOARD_INCIDENTS")]
    pub incidents: Option<PathBuf>,

    /// Always return mock analysis, even when an LLM key is configured.
    #[arg(long, env = "DASHBOARD_MOCK")]
    pub mock: bool,

    /// Simulated latency for mock analysis.
    #[arg(long, env = "DASHBOARD_MOCK_DELAY_MS", default_value_t = 3000)]
    pub mock_delay_ms: u64,

    /// Largest accepted upload, in bytes.
    #[arg(long, env = "DASHBOARD_MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Log level (trace/debug/info/warn/error). RUST_LOG takes precedence.
    #[arg(long, env = "DASHBOARD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "DASHBOARD_LOG_JSON")]
    pub log_json: bool,
}

/// The `--incidents` file when given, otherwise the built-in mock history.
pub fn load_history(args: &Args) -> Result<Vec<IncidentRecord>> {
    match &args.incidents {
        Some(path) => incident_registry::load_history(path)
            .with_context(|| format!("load incidents {}", path.display())),
        None => incident_registry::builtin_history().context("load builtin incidents"),
    }
}

/// Model settings from the environment; `None` when the key variable is unset.
pub fn build_llm_config_from_env() -> Option<LlmConfig> {
    let defaults = LlmConfig::default();
    let api_key_env = std::env::var("LLM_API_KEY_ENV").unwrap_or(defaults.api_key_env);
    if std::env::var(&api_key_env).is_err() {
        return None;
    }

    Some(LlmConfig {
        provider: std::env::var("LLM_PROVIDER").unwrap_or(defaults.provider),
        model: std::env::var("LLM_MODEL").unwrap_or(defaults.model),
        api_key_env,
        base_url: std::env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
        temperature: std::env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults.temperature),
    })
}

pub fn init_logging(args: &Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let stdout_layer = if args.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let args = Args::try_parse_from(["dashboard-server"]).expect("parse");
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(args.mock_delay_ms, 3000);
        assert_eq!(args.max_upload_bytes, 10 * 1024 * 1024);
        assert!(args.incidents.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "dashboard-server",
            "--bind",
            "127.0.0.1:3000",
            "--mock",
            "--mock-delay-ms",
            "0",
            "--incidents",
            "fixtures/incidents.json",
        ])
        .expect("parse");
        assert_eq!(args.bind.to_string(), "127.0.0.1:3000");
        assert!(args.mock);
        assert_eq!(args.mock_delay_ms, 0);
        assert_eq!(args.incidents, Some(PathBuf::from("fixtures/incidents.json")));
    }

    #[test]
    fn history_defaults_to_builtin_records() {
        let args = Args::try_parse_from(["dashboard-server"]).expect("parse");
        assert_eq!(load_history(&args).expect("history").len(), 5);
    }

    #[test]
    fn missing_history_file_names_the_path() {
        let args = Args::try_parse_from(["dashboard-server", "--incidents", "no/such/incidents.json"])
            .expect("parse");
        let err = load_history(&args).expect_err("missing file");
        assert!(format!("{err:#}").starts_with("load incidents no/such/incidents.json"));
    }
}
