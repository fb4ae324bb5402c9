//! Brand Forge - AI-powered brand name and logo generation service

use brand_forge::{build_state, server::build_app, AppConfig};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--help" | "-h") => {
            print_help();
            return Ok(());
        }
        Some("--version" | "-V") => {
            println!("brand-forge {}", brand_forge::VERSION);
            return Ok(());
        }
        Some(other) => {
            anyhow::bail!("Unknown argument: {other}. Use --help for usage information");
        }
        None => {}
    }

    let config = AppConfig::from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let app = build_app(build_state(&config)?);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "brand-forge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

/// Print help information
fn print_help() {
    println!("brand-forge - AI-powered brand name and logo generation");
    println!();
    println!("USAGE:");
    println!("    brand-forge            Start the HTTP server");
    println!("    brand-forge --help     Show this message");
    println!("    brand-forge --version  Show version");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /api/generate-names   {{\"prompt\": \"...\"}}");
    println!("    POST /api/generate-logos   {{\"name\": \"...\", \"prompt\": \"...\"}}");
    println!("    GET  /api/health");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    BRAND_FORGE_BIND          Listen address (default: 127.0.0.1:3000)");
    println!("    LLM_PROVIDER              openai | anthropic (default: openai)");
    println!("    OPENAI_API_KEY            OpenAI API key (also used for logos)");
    println!("    OPENAI_BASE_URL           OpenAI-compatible base URL");
    println!("    OPENAI_MODEL              Chat model (default: gpt-4o-mini)");
    println!("    ANTHROPIC_API_KEY         Anthropic API key");
    println!("    ANTHROPIC_MODEL           Anthropic model (default: claude-3-5-haiku-latest)");
    println!("    LLM_TIMEOUT_SECS          Model call bound (default: 30)");
    println!("    NAME_COUNT                Names per request (default: 5)");
    println!("    REGISTRY_BACKEND          domainsdb | rdap | none (default: domainsdb)");
    println!("    DOMAINSDB_URL             domainsdb API base URL");
    println!("    AVAILABILITY_TIMEOUT_MS   Per-lookup bound (default: 3000)");
    println!("    FALLBACK_AVAILABLE_RATIO  Guess bias when a lookup fails (default: 0.7)");
    println!("    IMAGE_MODEL               Image model (default: dall-e-3)");
    println!("    LOGO_COUNT                Logos per request (default: 4)");
    println!("    RUST_LOG                  Log filter (default: info)");
}
