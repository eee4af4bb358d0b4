use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::{Error, Result};
use crate::native::DhcpsApi;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// DHCP server to query.
    pub server_ip: Ipv4Addr,
    /// Module providing the management API, by file name or path.
    pub module_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_ip: Ipv4Addr::LOCALHOST,
            module_name: DhcpsApi::MODULE_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_ip.is_unspecified() {
            return Err(Error::InvalidConfig(
                "server_ip must not be 0.0.0.0".to_string(),
            ));
        }

        if self.server_ip.is_broadcast() {
            return Err(Error::InvalidConfig(
                "server_ip must not be the broadcast address".to_string(),
            ));
        }

        if self.module_name.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "module_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
