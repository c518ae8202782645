use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

/// How often a wallet may draw and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPolicy {
    /// No limits; the current reading is simply replaced by the next draw.
    Unlimited,
    /// At most `draws_per_day` draws and `resets_per_day` resets per wallet
    /// per calendar date, tracked through date-scoped storage keys.
    DailyLimit {
        draws_per_day: u32,
        resets_per_day: u32,
    },
}

/// Everything the session needs injected rather than read from globals:
/// contract coordinates, link bases, draw policy, presentation language.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub contract_address: String,
    pub mint_price_wei: u128,
    pub image_base_url: String,
    pub explorer_base: String,
    pub policy: DrawPolicy,
    pub reveal_delay: Duration,
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contract_address: String::new(),
            mint_price_wei: 100_000_000_000_000, // 0.0001 native token
            image_base_url: "https://your-domain.com".to_string(),
            explorer_base: "https://explorer.irys.xyz".to_string(),
            policy: DrawPolicy::Unlimited,
            reveal_delay: Duration::from_millis(500),
            language: Language::Zh,
        }
    }
}

impl AppConfig {
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_base, tx_hash)
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_base, address)
    }

    pub fn image_url(&self, image_path: &str) -> String {
        format!("{}{}", self.image_base_url, image_path)
    }

    /// A contract is usable only if an address is set and it is not the zero
    /// address placeholder.
    pub fn contract_configured(&self) -> bool {
        !self.contract_address.is_empty() && self.contract_address != ZERO_ADDRESS
    }
}
