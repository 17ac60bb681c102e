use anyhow::{Context, Result};
use common::{
    ContactBackend, LogSink, OrientationCell, ParserConfig, SignDictionary,
};
use log::{debug, error, info};
use otdg_d::glove::sim::SimContactBank;
use otdg_d::glove::ContactBank;
use otdg_d::sampler::SamplerSettings;
use otdg_d::server::{self, WsState};
use otdg_d::session::SessionController;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[cfg(target_os = "linux")]
fn gpio_bank(invert: bool) -> Result<Box<dyn ContactBank>> {
    Ok(Box::new(otdg_d::glove::gpio::GpioContactBank::new(invert)))
}

#[cfg(not(target_os = "linux"))]
fn gpio_bank(_invert: bool) -> Result<Box<dyn ContactBank>> {
    anyhow::bail!("the gpio backend is only available on linux; use \"backend\": \"sim\"")
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let debug_flag = args.iter().any(|arg| arg == "--debug");
    let no_orientation_flag = args.iter().any(|arg| arg == "--no-orientation");
    let insecure_flag = args.iter().any(|arg| arg == "--insecure");

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", if debug_flag { "debug" } else { "info" });
    }
    env_logger::init();

    info!("Starting...");

    let config_path = Path::new("config.json");
    let mut config = ParserConfig::load_or_create(config_path).unwrap_or_else(|e| {
        error!("Failed to load config: {}. Using defaults.", e);
        ParserConfig::default()
    });
    config.debug |= debug_flag;
    config.disable_orientation |= no_orientation_flag;
    config.insecure_transport |= insecure_flag;
    info!("Loaded Config: {:?}", config);

    // No dictionary, no recognition. An empty directory is fine; an
    // unreadable or malformed one is not.
    let dictionary = SignDictionary::load_dir(Path::new(&config.data_dir))
        .with_context(|| format!("loading sign dictionary from {:?}", config.data_dir))?;
    info!("{} sign(s) loaded", dictionary.len());
    if config.debug {
        for entry in dictionary.entries() {
            debug!("ID: {} loaded", entry.id);
        }
    }

    let bank: Box<dyn ContactBank> = match config.backend {
        ContactBackend::Gpio => gpio_bank(config.invert_contacts)?,
        ContactBackend::Sim => {
            info!("Using simulated contact bank");
            Box::new(SimContactBank::new())
        }
    };

    let orientation = OrientationCell::new();
    let controller = SessionController::new(
        bank,
        Box::new(LogSink {
            verbose: config.debug,
        }),
        orientation.clone(),
        Arc::new(dictionary),
        SamplerSettings {
            period: Duration::from_millis(config.sample_period_ms),
        },
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting signal handler");

    if config.disable_orientation {
        info!("Orientation reception disabled; sampling with unknown orientation");
        controller
            .start()
            .context("starting sampling without orientation")?;
    } else {
        let state = WsState {
            orientation: orientation.clone(),
            controller: controller.clone(),
            keepalive: Duration::from_millis(config.keepalive_timeout_ms),
        };
        let server_config = config.clone();
        let r = running.clone();
        thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
            rt.block_on(async {
                if let Err(e) = server::serve(&server_config, state).await {
                    // Without a listener no session can ever start, so
                    // take the whole daemon down.
                    error!("Session host failed: {}", e);
                    r.store(false, Ordering::SeqCst);
                }
            });
        });
    }

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    info!("Shutting down...");
    controller.close();
    Ok(())
}
