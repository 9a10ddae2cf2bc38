use crate::{
    config::{self, Config},
    trigger::Pipeline,
};
use anyhow::{Context as _, Result};
use fuelwatch_core::{
    entities::{EmailAddress, EmailContent},
    gateways::{self, email::EmailGateway},
};
use fuelwatch_db_supabase::Supabase;
use fuelwatch_gateways::{
    email::{mailgun::Mailgun, send_to_json_file::SendToJsonFile},
    fuelcheck::FuelCheck,
    http_client,
    onegov::OneGov,
    user_communication::PriceAlertEmailFormatter,
};
use reqwest::blocking::Client;

/// All client handles that are needed for a run.
///
/// The handles are created once and must not be created
/// or dropped within the async runtime.
pub struct Gateways {
    pub subscriptions: Supabase,
    pub boundaries: OneGov,
    pub fuel_prices: FuelCheck,
    pub email: EmailGw,
    pub formatter: PriceAlertEmailFormatter,
}

impl Gateways {
    pub fn try_new(cfg: &Config) -> Result<Self> {
        let client = http_client(cfg.http.timeout, &cfg.http.user_agent)?;
        let subscriptions = Supabase::new(
            client.clone(),
            &cfg.subscriptions.url,
            &cfg.subscriptions.api_key,
            &cfg.subscriptions.table,
        );
        let boundaries = OneGov::new(client.clone(), &cfg.boundaries.api_base_url)?;
        let fuel_prices = FuelCheck::new(client.clone(), &cfg.fuel_prices.api_url);
        let email = email_gateway(client, cfg.email.gateway.clone())?;
        Ok(Self {
            subscriptions,
            boundaries,
            fuel_prices,
            email,
            formatter: PriceAlertEmailFormatter,
        })
    }

    pub fn pipeline(
        &self,
    ) -> Pipeline<'_, Supabase, OneGov, FuelCheck, EmailGw, PriceAlertEmailFormatter> {
        Pipeline {
            repo: &self.subscriptions,
            boundary_gateway: &self.boundaries,
            price_gateway: &self.fuel_prices,
            email_gateway: &self.email,
            formatter: &self.formatter,
        }
    }
}

pub fn email_gateway(client: Client, cfg: config::EmailGateway) -> Result<EmailGw> {
    let gw = match cfg {
        config::EmailGateway::MailGun {
            api_base_url,
            api_key,
            domain,
            sender_address,
        } => EmailGw::new(Mailgun {
            client,
            api_key,
            api_base_url,
            domain,
            from_email: sender_address,
        }),
        config::EmailGateway::EmailToJsonFile { dir } => {
            let gw = SendToJsonFile::try_new(&dir)
                .with_context(|| format!("Unable to write e-mails into {}", dir.display()))?;
            EmailGw::new(gw)
        }
    };
    Ok(gw)
}

pub struct EmailGw(Box<dyn EmailGateway + Send + Sync + 'static>);

impl EmailGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self(Box::new(gw))
    }
}

impl EmailGateway for EmailGw {
    fn send(&self, recipient: &EmailAddress, email: &EmailContent) -> gateways::Result<()> {
        self.0.send(recipient, email)
    }
}
