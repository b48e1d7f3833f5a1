use std::collections::HashMap;
use std::sync::OnceLock;

use once_cell::sync::Lazy;
pub use tracing::Level;

/// Environment variable consulted for log levels.
///
/// Accepts a global level plus per-scope overrides, e.g.
/// `ROOMVR_LOG=warn,input=debug,media=trace`.
pub const LOG_ENV_VAR: &str = "ROOMVR_LOG";

static LOG_CONFIG: OnceLock<LogConfig> = OnceLock::new();
static DEFAULT_CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::default);

#[derive(Debug, Clone)]
pub struct LogConfig {
    global_level: Level,
    scope_levels: HashMap<String, Level>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            global_level: Level::WARN,
            scope_levels: HashMap::new(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(levels) = std::env::var(LOG_ENV_VAR) {
            config.parse(&levels);
        }
        config
    }

    fn parse(&mut self, levels: &str) {
        for part in levels.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                Some((scope, level)) => {
                    if let Some(level) = parse_level(level.trim()) {
                        self.scope_levels.insert(scope.trim().to_string(), level);
                    }
                }
                None => {
                    if let Some(level) = parse_level(part) {
                        self.global_level = level;
                    }
                }
            }
        }
    }

    pub fn should_log(&self, scope: &str, level: Level) -> bool {
        let target = self.scope_levels.get(scope).unwrap_or(&self.global_level);
        level <= *target
    }

    pub fn set_global_level(&mut self, level: Level) {
        self.global_level = level;
    }

    pub fn set_scope_level(&mut self, scope: impl Into<String>, level: Level) {
        self.scope_levels.insert(scope.into(), level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_level(level: &str) -> Option<Level> {
    match level.to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

pub fn log_config() -> &'static LogConfig {
    LOG_CONFIG.get().unwrap_or(&DEFAULT_CONFIG)
}

/// Install the tracing subscriber and capture the env-derived scope config.
/// Safe to call more than once; later calls keep the first config.
pub fn init_logging() -> LogConfig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = LogConfig::from_env();
    LOG_CONFIG.set(config.clone()).ok();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_level() {
        let mut config = LogConfig::new();
        config.parse("debug");
        assert!(config.should_log("anything", Level::DEBUG));
        assert!(!config.should_log("anything", Level::TRACE));
    }

    #[test]
    fn parses_scope_overrides() {
        let mut config = LogConfig::new();
        config.parse("warn,input=debug,media=trace");

        assert!(config.should_log("input", Level::DEBUG));
        assert!(!config.should_log("input", Level::TRACE));
        assert!(config.should_log("media", Level::TRACE));

        // Unlisted scopes fall back to the global level
        assert!(config.should_log("player", Level::WARN));
        assert!(!config.should_log("player", Level::INFO));
    }

    #[test]
    fn ignores_malformed_entries() {
        let mut config = LogConfig::new();
        config.parse("bogus,input=nonsense, ,media=info");

        assert!(!config.should_log("input", Level::INFO));
        assert!(config.should_log("media", Level::INFO));
    }
}
