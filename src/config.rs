use std::{env, fs, path::PathBuf};

use serde::Deserialize;
use starknet::core::types::Felt;
use thiserror::Error;

use crate::utils::starknet::parse_token_amount;

// a u256 holds at most 78 decimal digits
const MAX_TOKEN_DECIMALS: u32 = 77;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file {0:?}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid PORT value: {0}")]
    Port(String),
    #[error("invalid felt for {0}: {1}")]
    Felt(&'static str, String),
    #[error("invalid preset amount {0:?}")]
    Preset(String),
    #[error("token_decimals must be at most 77, got {0}")]
    Decimals(u32),
}

/// Raw settings as written in the TOML file; every key is optional.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub port: u16,
    pub public_dir: PathBuf,
    pub public_base_url: String,
    pub unfurler_url: String,
    pub donation_wallet: String,
    pub token_contract: String,
    pub token_symbol: String,
    pub token_decimals: u32,
    pub preset_amounts: Vec<String>,
    pub twitter_handle: String,
    pub image_path: String,
    pub redirect_delay_ms: u64,
    pub prepare_timeout_ms: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            port: 3000,
            public_dir: PathBuf::from("public"),
            public_base_url: "https://buy-me-a-cofee-action-sotoijuan.vercel.app".to_string(),
            unfurler_url: "https://ethereum-blink-unfurler.vercel.app/".to_string(),
            donation_wallet: "0x046da3ee187b8b0d3716f1c08b0c751f62ce9df30e8513a1c070526cfab12507"
                .to_string(),
            token_contract: "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d"
                .to_string(),
            token_symbol: "STRK".to_string(),
            token_decimals: 18,
            preset_amounts: vec!["10".to_string(), "50".to_string(), "100".to_string()],
            twitter_handle: "@tjelailah".to_string(),
            image_path: "/images/buy-me-coffee.png".to_string(),
            redirect_delay_ms: 5000,
            prepare_timeout_ms: 2000,
        }
    }
}

/// Validated, process-wide configuration. Built once at startup.
#[derive(Debug, Clone)]
pub struct TipConfig {
    pub port: u16,
    pub public_dir: PathBuf,
    pub public_base_url: String,
    pub unfurler_url: String,
    pub donation_wallet: Felt,
    pub token_contract: Felt,
    pub token_symbol: String,
    pub token_decimals: u32,
    pub preset_amounts: Vec<String>,
    pub twitter_handle: String,
    pub image_path: String,
    pub redirect_delay_ms: u64,
    pub prepare_timeout_ms: u64,
}

impl TipConfig {
    /// Reads `$TIP_CONFIG` when set, then applies the `PORT` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut file = match env::var("TIP_CONFIG") {
            Ok(path) => {
                let path = PathBuf::from(path);
                let raw = fs::read_to_string(&path).map_err(|e| ConfigError::Read(path, e))?;
                toml::from_str::<FileConfig>(&raw)?
            }
            Err(_) => FileConfig::default(),
        };
        if let Ok(port) = env::var("PORT") {
            file.port = port.parse().map_err(|_| ConfigError::Port(port))?;
        }
        Self::try_from(file)
    }

    /// Absolute URL of the preview image.
    pub fn image_url(&self) -> String {
        format!(
            "{}{}",
            self.public_base_url.trim_end_matches('/'),
            self.image_path
        )
    }

    /// Public URL of the tip action, optionally scoped to an amount.
    pub fn action_url(&self, amount: Option<&str>) -> String {
        let base = format!("{}/api/tip", self.public_base_url.trim_end_matches('/'));
        match amount {
            Some(amount) => match url::Url::parse(&base) {
                Ok(mut url) => {
                    if let Ok(mut segments) = url.path_segments_mut() {
                        segments.push(amount);
                    }
                    url.to_string()
                }
                Err(_) => format!("{}/{}", base, amount),
            },
            None => base,
        }
    }
}

impl TryFrom<FileConfig> for TipConfig {
    type Error = ConfigError;

    fn try_from(file: FileConfig) -> Result<Self, Self::Error> {
        let donation_wallet = Felt::from_hex(&file.donation_wallet)
            .map_err(|_| ConfigError::Felt("donation_wallet", file.donation_wallet.clone()))?;
        let token_contract = Felt::from_hex(&file.token_contract)
            .map_err(|_| ConfigError::Felt("token_contract", file.token_contract.clone()))?;
        if file.token_decimals > MAX_TOKEN_DECIMALS {
            return Err(ConfigError::Decimals(file.token_decimals));
        }
        if let Some(bad) = file
            .preset_amounts
            .iter()
            .find(|amount| parse_token_amount(amount, file.token_decimals).is_err())
        {
            return Err(ConfigError::Preset(bad.clone()));
        }

        Ok(TipConfig {
            port: file.port,
            public_dir: file.public_dir,
            public_base_url: file.public_base_url,
            unfurler_url: file.unfurler_url,
            donation_wallet,
            token_contract,
            token_symbol: file.token_symbol,
            token_decimals: file.token_decimals,
            preset_amounts: file.preset_amounts,
            twitter_handle: file.twitter_handle,
            image_path: file.image_path,
            redirect_delay_ms: file.redirect_delay_ms,
            prepare_timeout_ms: file.prepare_timeout_ms,
        })
    }
}

#[cfg(test)]
impl Default for TipConfig {
    fn default() -> Self {
        match TipConfig::try_from(FileConfig::default()) {
            Ok(conf) => conf,
            Err(err) => panic!("built-in tip configuration is invalid: {}", err),
        }
    }
}
