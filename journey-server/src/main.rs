use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use journey_server::config::{ConfigStore, DataSource, FileSource, HttpSource, HttpSourceConfig};
use journey_server::itinerary::{ItineraryBackend, ItineraryStore, JsonFileBackend, SharedItinerary};
use journey_server::settings::Settings;
use journey_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Settings::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<(), String> {
    let source = match &settings.data_url {
        Some(url) => {
            let mut config = HttpSourceConfig::new(url);
            if let Some(key) = &settings.data_api_key {
                config = config.with_api_key(key);
            }
            let source = HttpSource::new(config).map_err(|e| e.to_string())?;
            info!(%url, "using HTTP config source");
            DataSource::Http(source)
        }
        None => {
            let source = FileSource::new(&settings.data_dir);
            info!(dir = %source.dir().display(), "using file config source");
            DataSource::File(source)
        }
    };

    // Fail fast if the configuration is unusable
    let config = ConfigStore::new(source);
    config
        .preload()
        .await
        .map_err(|e| format!("failed to load configuration: {e}"))?;

    let backend = JsonFileBackend::new(&settings.itinerary_path);
    let path = backend.path().display().to_string();
    let backend: Box<dyn ItineraryBackend> = Box::new(backend);
    let store = ItineraryStore::open(backend)
        .map_err(|e| format!("failed to open itinerary {path}: {e}"))?;
    info!(%path, entries = store.len(), "itinerary ready");
    let itinerary: SharedItinerary = Arc::new(tokio::sync::Mutex::new(store));

    let app = create_router(AppState::new(config, itinerary));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", settings.bind_addr))?;
    info!(addr = %settings.bind_addr, "journey server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {e}"))
}
