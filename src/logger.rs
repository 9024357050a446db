use std::fmt::Display;

use env_logger::Env;

/// Thin wrapper over the `log` facade, shared through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        // a second init (tests, embedding) keeps the first subscriber
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .format_timestamp_millis()
            .try_init();
        Logger
    }

    pub fn info<S: Display>(&self, message: S) {
        log::info!("{}", message);
    }

    pub fn warning<S: Display>(&self, message: S) {
        log::warn!("{}", message);
    }

    pub fn severe<S: Display>(&self, message: S) {
        log::error!("{}", message);
    }

    pub async fn async_info<S: Display>(&self, message: S) {
        self.info(message);
    }

    pub async fn async_warning<S: Display>(&self, message: S) {
        self.warning(message);
    }

    pub async fn async_severe<S: Display>(&self, message: S) {
        self.severe(message);
    }
}
