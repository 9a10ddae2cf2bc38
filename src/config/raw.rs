use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("fuelwatch.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub http: Http,
    pub prices: Prices,
    pub schedule: Schedule,
    pub subscriptions: Subscriptions,
    pub email: Email,
    pub gateway: Gateway,
}

impl Config {
    pub fn try_default() -> Result<Self, toml::de::Error> {
        Self::try_from_toml_str("")
    }

    /// Parses a configuration file on top of the default configuration.
    pub fn try_from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: toml::Table = toml::from_str(DEFAULT_CONFIG_FILE)?;
        let overlay: toml::Table = toml::from_str(toml_str)?;
        merge_tables(&mut config, overlay);
        toml::Value::Table(config).try_into()
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => {
                if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                    merge_tables(base_table, overlay_table);
                } else {
                    base.insert(key, toml::Value::Table(overlay_table));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Http {
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Prices {
    pub eligible_fuel_types: Vec<String>,
    pub search_radius: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Schedule {
    pub daily_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Subscriptions {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Email {
    pub gateway: EmailGateway,
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailGateway {
    Mailgun,
    EmailToJsonFile,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub mailgun: MailGun,
    pub email_to_json_file: EmailToJsonFile,
    pub onegov: OneGov,
    pub fuelcheck: FuelCheck,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MailGun {
    pub api_key: Option<String>,
    pub domain: Option<String>,
    pub sender_address: Option<String>,
    pub api_base_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmailToJsonFile {
    pub dir: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OneGov {
    pub api_base_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FuelCheck {
    pub api_url: Option<String>,
}
