use super::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct PriceAlert<'a> {
    /// Human readable name of the subscribed region.
    pub region: &'a str,
    pub cheapest: &'a CheapestStation,
}

pub trait PriceAlertFormatter {
    fn format_email(&self, alert: &PriceAlert) -> anyhow::Result<EmailContent>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed(String),
}

/// Sends a single price alert.
///
/// Formatting and delivery errors are reported as [`Delivery::Failed`].
pub fn send_price_alert<G, F>(
    email_gateway: &G,
    formatter: &F,
    recipient: &EmailAddress,
    alert: &PriceAlert,
) -> Delivery
where
    G: EmailGateway,
    F: PriceAlertFormatter,
{
    let email = match formatter.format_email(alert) {
        Ok(email) => email,
        Err(err) => {
            log::error!("Could not format price alert for {}: {err}", alert.region);
            return Delivery::Failed(format!("Could not format e-mail: {err}"));
        }
    };
    match email_gateway.send(recipient, &email) {
        Ok(()) => {
            log::info!("Price alert for {} sent to {recipient}", alert.region);
            Delivery::Sent
        }
        Err(err) => {
            log::warn!(
                "Could not send price alert for {} to {recipient}: {err}",
                alert.region
            );
            Delivery::Failed(err.to_string())
        }
    }
}
