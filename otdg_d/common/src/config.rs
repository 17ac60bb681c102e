use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which contact backend to drive the glove with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ContactBackend {
    /// Raspberry Pi GPIO lines (default, Linux only)
    #[default]
    #[serde(alias = "GPIO", alias = "gpio")]
    Gpio,
    /// In-memory simulated pads for hosts without the glove
    #[serde(alias = "sim", alias = "mock")]
    Sim,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Verbose logging, including per-entry non-match reports
    pub debug: bool,
    /// Skip the network channel entirely; sample with an unknown orientation
    pub disable_orientation: bool,
    /// Serve plain TCP instead of TLS
    pub insecure_transport: bool,

    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_cert")]
    pub cert: String,
    #[serde(default = "default_key")]
    pub key: String,

    /// Directory of sign dictionary files, merged at startup
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_sample_period_ms")]
    pub sample_period_ms: u64,
    #[serde(default = "default_keepalive_timeout_ms")]
    pub keepalive_timeout_ms: u64,

    /// Pads are wired with pull-ups, so engaged reads electrically low.
    /// Disable only for the legacy non-inverted harness.
    #[serde(default = "default_invert_contacts")]
    pub invert_contacts: bool,

    #[serde(default)]
    pub backend: ContactBackend,
}

fn default_listen() -> String {
    "0.0.0.0:443".to_string()
}

fn default_cert() -> String {
    "certs/server.pem".to_string()
}

fn default_key() -> String {
    "certs/key.pem".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_sample_period_ms() -> u64 {
    200
}

fn default_keepalive_timeout_ms() -> u64 {
    2000
}

fn default_invert_contacts() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            debug: false,
            disable_orientation: false,
            insecure_transport: false,
            listen: default_listen(),
            cert: default_cert(),
            key: default_key(),
            data_dir: default_data_dir(),
            sample_period_ms: default_sample_period_ms(),
            keepalive_timeout_ms: default_keepalive_timeout_ms(),
            invert_contacts: default_invert_contacts(),
            backend: ContactBackend::default(),
        }
    }
}

impl ParserConfig {
    /// Loads the config file, writing one with defaults if it is missing.
    pub fn load_or_create(path: &Path) -> std::io::Result<Self> {
        if path.exists() {
            info!("Loading config from {:?}", path);
            let file = fs::File::open(path)?;
            let reader = std::io::BufReader::new(file);
            let config = serde_json::from_reader(reader)?;
            Ok(config)
        } else {
            info!("Config not found. Creating default at {:?}", path);
            let config = ParserConfig::default();
            let file = fs::File::create(path)?;
            let writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &config)?;
            Ok(config)
        }
    }
}
