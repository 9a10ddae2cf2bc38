use fuelwatch_core::gateways::{email::EmailGateway, Result};
use fuelwatch_entities::email::*;
use reqwest::blocking::Client;

pub const DEFAULT_API_BASE_URL: &str = "https://api.mailgun.net/v3";

/// An email gateway based on mailgun.net.
#[derive(Debug, Clone)]
pub struct Mailgun {
    pub client: Client,
    pub api_key: String,
    pub api_base_url: String,
    pub domain: String,
    pub from_email: EmailAddress,
}

/// The sender that is used if no other address has been configured.
pub fn default_sender(domain: &str) -> EmailAddress {
    EmailAddress::new_unchecked(format!("postmaster@{domain}")).with_display_name("Fuel Price Alert")
}

impl Mailgun {
    fn messages_url(&self) -> String {
        let Self {
            api_base_url,
            domain,
            ..
        } = self;
        format!("{}/{domain}/messages", api_base_url.trim_end_matches('/'))
    }
}

#[cfg(not(test))]
#[derive(Debug, serde::Deserialize)]
struct JsonError {
    pub message: String,
}

#[cfg(not(test))]
fn send_raw(
    client: &Client,
    url: &str,
    api_key: &str,
    params: Vec<(&'static str, String)>,
) -> Result<()> {
    use crate::transport_error;
    use fuelwatch_core::gateways::Error;

    let response = client
        .post(url)
        .form(&params)
        .basic_auth("api", Some(api_key))
        .send()
        .map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        log::debug!("Mail provider response: {:#?}", response);
        return Ok(());
    }
    let reason = response
        .json::<JsonError>()
        .map(|json_error| json_error.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_owned());
    Err(Error::Status {
        status: status.as_u16(),
        reason,
    })
}

/// Don't actually send emails while running the tests.
#[cfg(test)]
fn send_raw(
    _: &Client,
    url: &str,
    _: &str,
    params: Vec<(&'static str, String)>,
) -> Result<()> {
    log::debug!("Would send e-mail via {url}: {:?}", params);
    Ok(())
}

fn message_params(
    from: &EmailAddress,
    to: &EmailAddress,
    email: &EmailContent,
) -> Vec<(&'static str, String)> {
    vec![
        ("from", from.to_string()),
        ("to", to.as_str().to_owned()),
        ("subject", email.subject.to_owned()),
        ("text", email.text.to_owned()),
        ("html", email.html.to_owned()),
    ]
}

impl EmailGateway for Mailgun {
    fn send(&self, recipient: &EmailAddress, email: &EmailContent) -> Result<()> {
        log::debug!("Sending e-mail from {} to {recipient}", self.from_email);
        let params = message_params(&self.from_email, recipient, email);
        send_raw(&self.client, &self.messages_url(), &self.api_key, params)
    }
}
