mod api;
mod rag;
mod router;
mod startup;
mod state;
mod vector_store;

#[cfg(test)]
mod test_support;

use clap::Parser;
use tracing::info;

/// HTTP service for sentence-aware document chunking and retrieval.
#[derive(Parser, Debug)]
#[command(name = "ragbasic-server", version, about)]
struct Cli {
    /// Bind address (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Config profile; every key is looked up as `{PROFILE}_{KEY}` first.
    #[arg(long, env = "RAGBASIC_PROFILE")]
    profile: Option<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<ragbasic_core::Config> {
    ragbasic_core::config::load_dotenv();
    let mut config = match cli.profile.as_deref() {
        Some(profile) => ragbasic_core::Config::for_profile(profile),
        None => ragbasic_core::Config::from_env(),
    };
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    config.log_summary();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let port = config.server.port;

    let state = startup::build_app_state(config).await;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
