//! Vault configuration.
//!
//! Every field has a default, so hosts may supply a partial JSON object
//! (or nothing at all).

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::generator::DEFAULT_PASSWORD_LENGTH;
use crate::Result;

/// Key the browser app keeps its entries under.
pub const DEFAULT_STORAGE_KEY: &str = "cyber_vault_passwords";

/// Longest indicator duration honoured; larger values are capped to this.
pub const MAX_FLASH_MS: u64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VaultConfig {
    /// Key the serialized entry list is stored under.
    pub storage_key: String,
    pub generated_password_length: usize,
    /// How long the "Saved" indicator stays up after a mutation.
    pub save_flash_ms: u64,
    /// How long a copy confirmation stays up.
    pub copy_flash_ms: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            generated_password_length: DEFAULT_PASSWORD_LENGTH,
            save_flash_ms: 2000,
            copy_flash_ms: 2000,
        }
    }
}

impl VaultConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_flash(&self) -> Duration {
        Duration::milliseconds(clamp_ms(self.save_flash_ms))
    }

    pub fn copy_flash(&self) -> Duration {
        Duration::milliseconds(clamp_ms(self.copy_flash_ms))
    }
}

fn clamp_ms(ms: u64) -> i64 {
    // MAX_FLASH_MS fits in i64.
    ms.min(MAX_FLASH_MS) as i64
}
