use music_search::catalog::http::HttpEntityStore;
use music_search::config::types::AppConfig;
use music_search::index::http::ElasticsearchBackend;
use music_search::search::gateway::SearchGateway;
use music_search::search::handlers::routes;
use music_search::search::hydrator::ResultHydrator;
use music_search::search::types::EntityKind;
use music_search::transport::RetryingClient;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: Option<SocketAddr> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" if i + 1 < args.len() => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--config" if i + 1 < args.len() => {
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!("Usage: {} [--bind <addr:port>] [--config <file.json>]", args[0]);
                eprintln!("Example: {} --bind 127.0.0.1:8080", args[0]);
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    let mut config = AppConfig::load(config_path.as_deref())?;
    if let Some(bind) = bind_addr {
        config.bind = bind;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .init();

    tracing::info!("Index backend: {}", config.index.url);
    tracing::info!(
        "Backend failure policy: {:?}, concurrent hydration: {}",
        config.search.failure_policy,
        config.search.concurrent_hydration
    );

    // 1. Remote clients:
    let client = RetryingClient::new(config.request_timeout(), config.index.retry_attempts);
    let backend = Arc::new(ElasticsearchBackend::new(client.clone(), &config.index.url));
    let artist_store = Arc::new(HttpEntityStore::new(client.clone(), &config.artists.store_url));
    let album_store = Arc::new(HttpEntityStore::new(client, &config.albums.store_url));

    // 2. Search pipeline:
    let classifier = config.classifier();
    for entry in classifier.entries() {
        tracing::info!(
            "Classifying {}/{} as {}",
            entry.partition,
            entry.type_tag,
            entry.kind
        );
    }
    let hydrator = ResultHydrator::new()
        .with_source(EntityKind::Artist, artist_store, config.artists.projection.clone())
        .with_source(EntityKind::Album, album_store, config.albums.projection.clone());
    let gateway = Arc::new(SearchGateway::new(
        backend,
        classifier,
        hydrator,
        config.search.clone(),
    ));

    // 3. HTTP server:
    let app = routes(gateway);

    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
