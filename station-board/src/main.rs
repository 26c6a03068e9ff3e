use std::net::SocketAddr;
use std::time::Duration;

use station_board::board::BoardConfig;
use station_board::cache::{CacheConfig, CachedDigitrafficClient};
use station_board::digitraffic::{
    DigitrafficClient, DigitrafficConfig, DigitrafficError, MockDigitrafficClient,
};
use station_board::preferences::PreferenceStore;
use station_board::source::DataSource;
use station_board::stations::{StationCache, StationCacheConfig, StationError, StationRegistry};
use station_board::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How often to refresh the station directory (24 hours).
const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_PREFS_PATH: &str = "preferences.json";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_LOG_FILTER: &str = "station_board=info";

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid STATION_BOARD_ADDR: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("failed to create Digitraffic client: {0}")]
    Client(#[from] DigitrafficError),

    #[error("failed to load stations: {0}")]
    Stations(#[from] StationError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        error!(error = %e, "station board failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let addr: SocketAddr = env_or("STATION_BOARD_ADDR", DEFAULT_ADDR).parse()?;
    let static_dir = env_or("STATION_BOARD_STATIC", DEFAULT_STATIC_DIR);

    // Fixture data replaces the live API when a mock directory is given
    let (source, station_cache) = match std::env::var("STATION_BOARD_MOCK_DIR") {
        Ok(dir) => {
            info!(dir = %dir, "using mock train data");
            (DataSource::from(MockDigitrafficClient::new(&dir)?), None)
        }
        Err(_) => {
            let user = std::env::var("DIGITRAFFIC_USER").unwrap_or_else(|_| {
                warn!("DIGITRAFFIC_USER not set, using default client name");
                DigitrafficConfig::default().user
            });
            let mut config = DigitrafficConfig::new(user);
            if let Ok(base_url) = std::env::var("DIGITRAFFIC_BASE_URL") {
                config = config.with_base_url(base_url);
            }

            let client = DigitrafficClient::new(config)?;
            let cached = CachedDigitrafficClient::new(client, &CacheConfig::default());

            let cache_config = match std::env::var("STATION_BOARD_CACHE") {
                Ok(path) => StationCacheConfig::new(path),
                Err(_) => StationCacheConfig::default(),
            };
            (DataSource::from(cached), Some(StationCache::new(cache_config)))
        }
    };

    // Load the station directory (fail fast if unavailable)
    info!("loading stations");
    let stations = StationRegistry::load(source.clone(), station_cache).await?;
    info!(count = stations.len().await, "stations loaded");

    // Spawn background task to refresh the directory daily
    let stations_refresh = stations.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match stations_refresh.refresh().await {
                Ok(count) => info!(count, "refreshed stations"),
                Err(e) => warn!(error = %e, "failed to refresh stations"),
            }
        }
    });

    let preferences = PreferenceStore::open(env_or("STATION_BOARD_PREFS", DEFAULT_PREFS_PATH));
    let theme = preferences.theme().await;
    info!(path = ?preferences.path(), %theme, "preferences loaded");

    let state = AppState::new(source, stations, preferences, BoardConfig::default());
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("station board listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
