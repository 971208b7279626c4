use crate::discovery::ENDPOINT_LISTING_PATH;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use url::Url;

/// Partner instances keyed by the name their results are reported under.
///
/// ```json
/// {
///   "acme": {"ontodocker": {"name": "ACME", "address": "https://acme.example.org", "token": "..."}}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnersConfig {
    pub partners: BTreeMap<String, PartnerConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerConfig {
    #[serde(default)]
    pub ontodocker: ConnectionConfig,
}

/// Connection info of a partner's instance as written in the config file.
/// Missing fields are reported per partner when the config is turned into a [`Partner`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// A validated partner instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partner {
    pub name: String,
    pub address: String,
    pub token: String,
}

impl PartnersConfig {
    pub fn from_json_str(json: &str) -> Result<PartnersConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<PartnersConfig, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::ReadConfigFileError {
            path: path.display().to_string(),
            source,
        })?;
        PartnersConfig::from_json_str(&json)
    }

    pub fn insert(&mut self, key: impl Into<String>, partner: PartnerConfig) {
        self.partners.insert(key.into(), partner);
    }
}

impl PartnerConfig {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        token: impl Into<String>,
    ) -> PartnerConfig {
        PartnerConfig {
            ontodocker: ConnectionConfig {
                name: Some(name.into()),
                address: Some(address.into()),
                token: Some(token.into()),
            },
        }
    }

    /// Validates the connection info of the partner configured under `key`.
    /// The token may be empty, whether it is accepted is up to the partner instance.
    pub fn to_partner(&self, key: &str) -> Result<Partner, ConfigError> {
        let ConnectionConfig {
            name,
            address,
            token,
        } = &self.ontodocker;
        let address = match address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => address.trim_end_matches('/'),
            _ => {
                return Err(ConfigError::MissingAddress {
                    partner: key.to_string(),
                })
            }
        };
        if let Err(source) = Url::parse(address) {
            return Err(ConfigError::InvalidAddress {
                partner: key.to_string(),
                address: address.to_string(),
                source,
            });
        }
        let Some(token) = token else {
            return Err(ConfigError::MissingToken {
                partner: key.to_string(),
            });
        };
        Ok(Partner {
            name: name.clone().unwrap_or_else(|| key.to_string()),
            address: address.to_string(),
            token: token.clone(),
        })
    }
}

impl Partner {
    pub fn endpoint_listing_url(&self) -> String {
        format!("{}{}", self.address, ENDPOINT_LISTING_PATH)
    }
}
