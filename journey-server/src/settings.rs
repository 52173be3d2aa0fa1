//! Process settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

pub const DATA_DIR_VAR: &str = "JOURNEY_DATA_DIR";
pub const DATA_URL_VAR: &str = "JOURNEY_DATA_URL";
pub const DATA_API_KEY_VAR: &str = "JOURNEY_DATA_API_KEY";
pub const ITINERARY_PATH_VAR: &str = "JOURNEY_ITINERARY_PATH";
pub const BIND_ADDR_VAR: &str = "JOURNEY_BIND_ADDR";

/// Server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding `fares_config.json`, `rail_network.json` and `pois.json`
    pub data_dir: PathBuf,

    /// When set, documents are fetched from this base URL instead of `data_dir`
    pub data_url: Option<String>,

    /// API key for `data_url`
    pub data_api_key: Option<String>,

    /// Where the itinerary is saved
    pub itinerary_path: PathBuf,

    /// Address to listen on
    pub bind_addr: SocketAddr,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            data_url: None,
            data_api_key: None,
            itinerary_path: PathBuf::from("itinerary.json"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`. Unset or empty variables keep their
    /// defaults; an unparseable bind address is logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(dir) = var(DATA_DIR_VAR) {
            settings.data_dir = PathBuf::from(dir);
        }
        settings.data_url = var(DATA_URL_VAR);
        settings.data_api_key = var(DATA_API_KEY_VAR);
        if let Some(path) = var(ITINERARY_PATH_VAR) {
            settings.itinerary_path = PathBuf::from(path);
        }
        if let Some(addr) = var(BIND_ADDR_VAR) {
            match addr.trim().parse() {
                Ok(addr) => settings.bind_addr = addr,
                Err(e) => warn!(
                    value = %addr,
                    error = %e,
                    default = %settings.bind_addr,
                    "invalid {BIND_ADDR_VAR}, using default"
                ),
            }
        }

        settings
    }
}
