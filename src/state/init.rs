use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::TipConfig;
use crate::logger::Logger;

use super::AppState;

pub trait AppStateTraitInitializer {
    fn load() -> Result<Arc<Self>>;
}

impl AppStateTraitInitializer for AppState {
    fn load() -> Result<Arc<Self>> {
        let logger = Logger::new();
        let conf = TipConfig::from_env().context("unable to load tip configuration")?;
        logger.info(format!(
            "tip config: {} (decimals {}) at {:#x}, presets {:?}",
            conf.token_symbol, conf.token_decimals, conf.token_contract, conf.preset_amounts
        ));

        Ok(Arc::new(AppState { logger, conf }))
    }
}
