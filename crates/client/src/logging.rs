//! Tracing setup for the headless client.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Where log output goes.
///
/// Environment variables:
/// - `IRONCLAD_LOG_DIR` - enables a per-session log file under this directory
/// - `IRONCLAD_SESSION` - session name (default: `session_<unix seconds>`)
/// - `RUST_LOG` - filter directives (default: `info`)
#[derive(Clone, Debug, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub session: Option<String>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            dir: std::env::var_os("IRONCLAD_LOG_DIR").map(PathBuf::from),
            session: std::env::var("IRONCLAD_SESSION").ok(),
        }
    }

    fn session_name(&self) -> String {
        self.session.clone().unwrap_or_else(|| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            format!("session_{secs}")
        })
    }
}

/// Installs the global subscriber: stderr always, plus a non-blocking file
/// writer when a log directory is configured.
///
/// The returned guard flushes the file writer on drop and must outlive the run.
pub fn setup_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let mut log_file = None;
    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            let session_dir = dir.join(config.session_name());
            std::fs::create_dir_all(&session_dir)?;
            let appender = tracing_appender::rolling::never(&session_dir, "client.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            log_file = Some(session_dir.join("client.log"));
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        tracing::info!("Log file: {}", path.display());
    }
    Ok(guard)
}
