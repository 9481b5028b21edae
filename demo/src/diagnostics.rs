use std::{error::Error, str::FromStr};
use tracing::Level;
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_LEVEL_VAR: &str = "DEMO_LOG";
const CHROME_TRACE_VAR: &str = "DEMO_CHROME_TRACE";

/// Keeps Chrome trace file open until dropped.
pub struct Diagnostics {
    _chrome_guard: Option<FlushGuard>,
}

impl Diagnostics {
    /// Installs global subscriber: formatted output filtered by `DEMO_LOG`
    /// level, plus Chrome trace written to path from `DEMO_CHROME_TRACE`.
    pub fn install() -> Result<Self, Box<dyn Error>> {
        let level = match std::env::var(LOG_LEVEL_VAR) {
            Ok(level) => Level::from_str(&level)?,
            Err(_) => Level::INFO,
        };
        let (chrome_layer, chrome_guard) = match std::env::var_os(CHROME_TRACE_VAR) {
            Some(path) => {
                let (layer, guard) = ChromeLayerBuilder::new()
                    .file(path)
                    .include_args(true)
                    .build();
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(fmt::layer().with_filter(LevelFilter::from_level(level)))
            .with(chrome_layer)
            .try_init()?;

        Ok(Self {
            _chrome_guard: chrome_guard,
        })
    }
}
