use crate::error::{Error, Result};
use crate::types::*;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::time::Duration;

/// Environment variable that seeds the process-wide stabilization delay.
pub const DELAY_ENV_VAR: &str = "ODBC_DIAG_DELAY_MS";

pub const DEFAULT_STABILIZATION_DELAY: Duration = Duration::from_millis(1);

/// Knobs for diagnostic retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Pause before the first `SQLGetDiagRec` call. Some drivers report
    /// `SQL_INVALID_HANDLE` (while still filling the buffers) when queried
    /// immediately after the failing call. Zero disables the pause.
    pub stabilization_delay: Duration,
    /// Capacity of the message buffer, in characters, terminator included.
    pub max_message_length: SQLSMALLINT,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            stabilization_delay: DEFAULT_STABILIZATION_DELAY,
            max_message_length: SQL_MAX_MESSAGE_LENGTH,
        }
    }
}

impl CollectorConfig {
    pub fn with_stabilization_delay(mut self, delay: Duration) -> Self {
        self.stabilization_delay = delay;
        self
    }

    pub fn with_max_message_length(mut self, len: SQLSMALLINT) -> Self {
        self.max_message_length = len.max(1);
        self
    }

    /// Read `DiagDelayMs` and `DiagMaxMessageLength` out of a connection
    /// string. Other keys are ignored.
    pub fn from_connection_string(conn_str: &str) -> Result<Self> {
        let mut config = Self::default();

        for part in conn_str.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some(idx) = part.find('=') {
                let key = part[..idx].trim().to_lowercase();
                let val = part[idx + 1..].trim();
                match key.as_str() {
                    "diagdelayms" => {
                        config.stabilization_delay = parse_delay_ms(val)?;
                    }
                    "diagmaxmessagelength" => {
                        let len = val.parse::<SQLSMALLINT>().map_err(|e| {
                            Error::Config(format!("DiagMaxMessageLength={val}: {e}"))
                        })?;
                        config = config.with_max_message_length(len);
                    }
                    _ => {}
                }
            }
        }
        Ok(config)
    }

    /// Defaults, with the delay taken from `ODBC_DIAG_DELAY_MS` when set.
    /// A malformed value is logged and ignored.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(DELAY_ENV_VAR) {
            Ok(val) => match parse_delay_ms(&val) {
                Ok(delay) => config.with_stabilization_delay(delay),
                Err(e) => {
                    tracing::warn!(target: "odbc_diag", %e, "ignoring {DELAY_ENV_VAR}");
                    config
                }
            },
            Err(_) => config,
        }
    }
}

fn parse_delay_ms(val: &str) -> Result<Duration> {
    val.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| Error::Config(format!("delay {val:?}: {e}")))
}

static DEFAULT_CONFIG: Lazy<RwLock<CollectorConfig>> =
    Lazy::new(|| RwLock::new(CollectorConfig::from_env()));

/// The configuration new collectors start from.
pub fn default_config() -> CollectorConfig {
    *DEFAULT_CONFIG.read()
}

/// Replace the process-wide default. Existing collectors keep theirs.
pub fn set_default_config(config: CollectorConfig) {
    *DEFAULT_CONFIG.write() = config;
}
