use clap::Parser;
use formforge::adapters::registry::DescriptorRegistry;
use formforge::cli::Cli;
use formforge::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting FormForge server on {}:{}", host, port);

    let registry = Arc::new(DescriptorRegistry::from_settings(&settings));
    info!("Registered {} form descriptors", registry.names().len());

    let app = formforge::create_app(registry);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
