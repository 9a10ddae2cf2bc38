use anyhow::{anyhow, bail, Context as _, Result};
use fuelwatch_core::entities::{EligibleFuelTypes, EmailAddress, FuelType};
use fuelwatch_gateways::{
    email::mailgun::{
        default_sender as default_mailgun_sender, DEFAULT_API_BASE_URL as MAILGUN_API_BASE_URL,
    },
    fuelcheck::DEFAULT_API_URL as FUELCHECK_API_URL,
    onegov::DEFAULT_API_BASE_URL as ONEGOV_API_BASE_URL,
};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};
use time::{format_description::FormatItem, macros::format_description};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "fuelwatch.toml";

const ENV_NAME_SUPABASE_URL: &str = "SUPABASE_URL";
const ENV_NAME_SUPABASE_SECRET_KEY: &str = "SUPABASE_SECRET_KEY";
const ENV_NAME_MAILGUN_API_KEY: &str = "MAILGUN_API_KEY";
const ENV_NAME_MAILGUN_DOMAIN: &str = "MAILGUN_DOMAIN";
const ENV_NAME_MAILGUN_API_BASE_URL: &str = "MAILGUN_API_BASE_URL";

const DAILY_AT_FORMAT: &[FormatItem] = format_description!("[hour]:[minute]");

pub struct Config {
    pub http: Http,
    pub prices: Prices,
    pub schedule: Schedule,
    pub subscriptions: Subscriptions,
    pub email: Email,
    pub boundaries: Boundaries,
    pub fuel_prices: FuelPrices,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let explicit_file = file_path.is_some();
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => raw::Config::try_from_toml_str(&cfg_string)
                .with_context(|| format!("Invalid configuration file {}", file_path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound && !explicit_file => {
                log::info!("{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration.");
                raw::Config::try_default()?
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Unable to read configuration file {}", file_path.display())
                });
            }
        };
        Self::try_from_raw_with_env(raw_config, |name| env::var(name).ok())
    }

    fn try_from_raw_with_env<F>(mut raw_config: raw::Config, env_var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        apply_env_overrides(&mut raw_config, env_var);
        Self::try_from(raw_config)
    }
}

fn apply_env_overrides<F>(cfg: &mut raw::Config, env_var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env_var(ENV_NAME_SUPABASE_URL) {
        cfg.subscriptions.url = Some(url);
    }
    if let Some(api_key) = env_var(ENV_NAME_SUPABASE_SECRET_KEY) {
        cfg.subscriptions.api_key = Some(api_key);
    }
    if let Some(api_key) = env_var(ENV_NAME_MAILGUN_API_KEY) {
        cfg.gateway.mailgun.api_key = Some(api_key);
    }
    if let Some(domain) = env_var(ENV_NAME_MAILGUN_DOMAIN) {
        cfg.gateway.mailgun.domain = Some(domain);
    }
    if let Some(api_base_url) = env_var(ENV_NAME_MAILGUN_API_BASE_URL) {
        cfg.gateway.mailgun.api_base_url = Some(api_base_url);
    }
}

pub struct Http {
    /// Applies to every single request.
    pub timeout: Duration,
    pub user_agent: String,
}

pub struct Prices {
    pub eligible_fuel_types: EligibleFuelTypes,
    /// Kilometers
    pub search_radius: u32,
}

pub struct Schedule {
    /// UTC
    pub daily_at: time::Time,
}

pub struct Subscriptions {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

pub struct Email {
    pub gateway: EmailGateway,
}

#[derive(Clone)]
pub enum EmailGateway {
    MailGun {
        api_base_url: String,
        api_key: String,
        domain: String,
        sender_address: EmailAddress,
    },
    /// For local testing purposes
    EmailToJsonFile {
        /// File system directory for writing emails into JSON files.
        dir: PathBuf,
    },
}

pub struct Boundaries {
    pub api_base_url: String,
}

pub struct FuelPrices {
    pub api_url: String,
}

fn parse_eligible_fuel_types(codes: &[String]) -> Result<EligibleFuelTypes> {
    let fuel_types = codes
        .iter()
        .map(|code| {
            code.parse::<FuelType>()
                .map_err(|_| anyhow!("Unknown fuel type '{code}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    let eligible_fuel_types = EligibleFuelTypes::new(fuel_types);
    if eligible_fuel_types.is_empty() {
        bail!("No eligible fuel types defined");
    }
    Ok(eligible_fuel_types)
}

fn required(value: Option<String>, name: &str, env_name: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("Missing configuration value '{name}' (or environment variable {env_name})"))
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            http,
            prices,
            schedule,
            subscriptions,
            email,
            gateway,
        } = from;

        let raw::Http {
            timeout,
            user_agent,
        } = http;
        let http = Http {
            timeout,
            user_agent,
        };

        let raw::Prices {
            eligible_fuel_types,
            search_radius,
        } = prices;
        let prices = Prices {
            eligible_fuel_types: parse_eligible_fuel_types(&eligible_fuel_types)?,
            search_radius,
        };

        let raw::Schedule { daily_at } = schedule;
        let daily_at = time::Time::parse(&daily_at, DAILY_AT_FORMAT)
            .with_context(|| format!("Invalid daily schedule time '{daily_at}'"))?;
        let schedule = Schedule { daily_at };

        let raw::Subscriptions {
            url,
            api_key,
            table,
        } = subscriptions;
        let subscriptions = Subscriptions {
            url: required(url, "subscriptions.url", ENV_NAME_SUPABASE_URL)?,
            api_key: required(api_key, "subscriptions.api-key", ENV_NAME_SUPABASE_SECRET_KEY)?,
            table,
        };

        let raw::Gateway {
            mailgun,
            email_to_json_file,
            onegov,
            fuelcheck,
        } = gateway;

        let gateway = match email.gateway {
            raw::EmailGateway::Mailgun => {
                let raw::MailGun {
                    api_key,
                    domain,
                    sender_address,
                    api_base_url,
                } = mailgun;
                let api_key = required(api_key, "gateway.mailgun.api-key", ENV_NAME_MAILGUN_API_KEY)?;
                let domain = required(domain, "gateway.mailgun.domain", ENV_NAME_MAILGUN_DOMAIN)?;
                let sender_address = match sender_address {
                    Some(address) => address
                        .parse::<EmailAddress>()
                        .with_context(|| format!("Invalid sender address '{address}'"))?,
                    None => default_mailgun_sender(&domain),
                };
                let api_base_url =
                    api_base_url.unwrap_or_else(|| MAILGUN_API_BASE_URL.to_owned());
                log::info!("Use Mailgun gateway");
                EmailGateway::MailGun {
                    api_base_url,
                    api_key,
                    domain,
                    sender_address,
                }
            }
            raw::EmailGateway::EmailToJsonFile => {
                let raw::EmailToJsonFile { dir } = email_to_json_file;
                log::info!("Use JSON file email gateway ({})", dir.display());
                EmailGateway::EmailToJsonFile { dir }
            }
        };
        let email = Email { gateway };

        let raw::OneGov { api_base_url } = onegov;
        let boundaries = Boundaries {
            api_base_url: api_base_url.unwrap_or_else(|| ONEGOV_API_BASE_URL.to_owned()),
        };

        let raw::FuelCheck { api_url } = fuelcheck;
        let fuel_prices = FuelPrices {
            api_url: api_url.unwrap_or_else(|| FUELCHECK_API_URL.to_owned()),
        };

        Ok(Self {
            http,
            prices,
            schedule,
            subscriptions,
            email,
            boundaries,
            fuel_prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn complete_env() -> impl Fn(&str) -> Option<String> {
        env(&[
            (ENV_NAME_SUPABASE_URL, "https://abc.supabase.co"),
            (ENV_NAME_SUPABASE_SECRET_KEY, "service-role-key"),
            (ENV_NAME_MAILGUN_API_KEY, "key-123"),
            (ENV_NAME_MAILGUN_DOMAIN, "mg.example.com"),
        ])
    }

    #[test]
    fn load_default_config_with_env() {
        let raw = raw::Config::try_default().unwrap();
        let cfg = Config::try_from_raw_with_env(raw, complete_env()).unwrap();
        assert_eq!(cfg.http.timeout, Duration::from_secs(30));
        assert_eq!(cfg.prices.search_radius, 4);
        assert_eq!(cfg.prices.eligible_fuel_types, EligibleFuelTypes::default());
        assert_eq!(cfg.schedule.daily_at, time::Time::MIDNIGHT);
        assert_eq!(cfg.subscriptions.url, "https://abc.supabase.co");
        assert_eq!(cfg.subscriptions.table, "subscriptions");
        assert_eq!(
            cfg.boundaries.api_base_url,
            "https://api.onegov.nsw.gov.au/SmartmeterDashboardApp"
        );
        assert_eq!(
            cfg.fuel_prices.api_url,
            "https://www.fuelcheck.nsw.gov.au/fuel/api/v1/fuel/prices/bylocation"
        );
        match cfg.email.gateway {
            EmailGateway::MailGun {
                api_base_url,
                domain,
                sender_address,
                ..
            } => {
                assert_eq!(api_base_url, "https://api.mailgun.net/v3");
                assert_eq!(domain, "mg.example.com");
                assert_eq!(sender_address.as_str(), "postmaster@mg.example.com");
            }
            EmailGateway::EmailToJsonFile { .. } => panic!("unexpected email gateway"),
        }
    }

    #[test]
    fn missing_subscription_store_is_fatal() {
        let raw = raw::Config::try_default().unwrap();
        let err = Config::try_from_raw_with_env(
            raw,
            env(&[
                (ENV_NAME_MAILGUN_API_KEY, "key-123"),
                (ENV_NAME_MAILGUN_DOMAIN, "mg.example.com"),
            ]),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains(ENV_NAME_SUPABASE_URL));
    }

    #[test]
    fn missing_mailgun_credentials_are_fatal() {
        let raw = raw::Config::try_default().unwrap();
        let err = Config::try_from_raw_with_env(
            raw,
            env(&[
                (ENV_NAME_SUPABASE_URL, "https://abc.supabase.co"),
                (ENV_NAME_SUPABASE_SECRET_KEY, "service-role-key"),
                (ENV_NAME_MAILGUN_DOMAIN, "mg.example.com"),
            ]),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains(ENV_NAME_MAILGUN_API_KEY));
    }

    #[test]
    fn json_file_gateway_needs_no_mailgun_credentials() {
        let raw = raw::Config::try_from_toml_str(
            r#"
            [email]
            gateway = "email-to-json-file"

            [gateway.email-to-json-file]
            dir = "/tmp/fuelwatch-emails"
            "#,
        )
        .unwrap();
        let cfg = Config::try_from_raw_with_env(
            raw,
            env(&[
                (ENV_NAME_SUPABASE_URL, "https://abc.supabase.co"),
                (ENV_NAME_SUPABASE_SECRET_KEY, "service-role-key"),
            ]),
        )
        .unwrap();
        assert!(matches!(
            cfg.email.gateway,
            EmailGateway::EmailToJsonFile { ref dir } if dir == Path::new("/tmp/fuelwatch-emails")
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let raw = raw::Config::try_from_toml_str(
            r#"
            [subscriptions]
            url = "https://file.supabase.co"
            api-key = "file-key"

            [gateway.mailgun]
            sender-address = "Alerts <alerts@example.com>"
            "#,
        )
        .unwrap();
        let cfg = Config::try_from_raw_with_env(raw, complete_env()).unwrap();
        assert_eq!(cfg.subscriptions.url, "https://abc.supabase.co");
        assert_eq!(cfg.subscriptions.api_key, "service-role-key");
        match cfg.email.gateway {
            EmailGateway::MailGun { sender_address, .. } => {
                assert_eq!(sender_address.as_str(), "alerts@example.com");
            }
            EmailGateway::EmailToJsonFile { .. } => panic!("unexpected email gateway"),
        }
    }

    #[test]
    fn reject_unknown_fuel_types_and_invalid_schedule() {
        let raw = raw::Config::try_from_toml_str("[prices]\neligible-fuel-types = [\"E10\", \"XYZ\"]")
            .unwrap();
        assert!(Config::try_from_raw_with_env(raw, complete_env()).is_err());

        let raw = raw::Config::try_from_toml_str("[prices]\neligible-fuel-types = []").unwrap();
        assert!(Config::try_from_raw_with_env(raw, complete_env()).is_err());

        let raw = raw::Config::try_from_toml_str("[schedule]\ndaily-at = \"25:00\"").unwrap();
        assert!(Config::try_from_raw_with_env(raw, complete_env()).is_err());
    }

    #[test]
    fn parse_daily_schedule_time() {
        let raw = raw::Config::try_from_toml_str("[schedule]\ndaily-at = \"06:30\"").unwrap();
        let cfg = Config::try_from_raw_with_env(raw, complete_env()).unwrap();
        assert_eq!(
            cfg.schedule.daily_at,
            time::Time::from_hms(6, 30, 0).unwrap()
        );
    }

    #[test]
    fn override_upstream_urls() {
        let raw = raw::Config::try_from_toml_str(
            r#"
            [gateway.mailgun]
            api-base-url = "https://api.eu.mailgun.net/v3"

            [gateway.onegov]
            api-base-url = "http://localhost:8081/boundaries"

            [gateway.fuelcheck]
            api-url = "http://localhost:8082/prices"
            "#,
        )
        .unwrap();
        let cfg = Config::try_from_raw_with_env(raw, complete_env()).unwrap();
        assert_eq!(cfg.boundaries.api_base_url, "http://localhost:8081/boundaries");
        assert_eq!(cfg.fuel_prices.api_url, "http://localhost:8082/prices");
        match cfg.email.gateway {
            EmailGateway::MailGun { api_base_url, .. } => {
                assert_eq!(api_base_url, "https://api.eu.mailgun.net/v3");
            }
            EmailGateway::EmailToJsonFile { .. } => panic!("unexpected email gateway"),
        }
    }
}
