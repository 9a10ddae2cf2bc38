use askama::Template;
use fuelwatch_core::usecases::{PriceAlert, PriceAlertFormatter};
use fuelwatch_entities::email::EmailContent;

#[derive(Template)]
#[template(path = "price_alert/subject.txt")]
struct PriceAlertSubjectTemplate<'a> {
    region: &'a str,
}

#[derive(Template)]
#[template(path = "price_alert/body.txt")]
struct PriceAlertTextTemplate<'a> {
    region: &'a str,
    price: &'a str,
    name: &'a str,
    address: &'a str,
}

#[derive(Template)]
#[template(path = "price_alert/body.html")]
struct PriceAlertHtmlTemplate<'a> {
    region: &'a str,
    price: &'a str,
    name: &'a str,
    address: &'a str,
}

/// Prices are always shown with two decimal places.
///
/// Cents are rounded half away from zero, e.g. `1.625` is shown as `1.63`.
fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round();
    format!("{:.2}", cents / 100.0)
}

pub fn price_alert_email(alert: &PriceAlert) -> askama::Result<EmailContent> {
    let PriceAlert { region, cheapest } = *alert;
    let price = &format_price(cheapest.price);
    let name = &cheapest.name;
    let address = &cheapest.address;
    let subject = PriceAlertSubjectTemplate { region }.render()?.trim().to_owned();
    let text = PriceAlertTextTemplate {
        region,
        price,
        name,
        address,
    }
    .render()?;
    let html = PriceAlertHtmlTemplate {
        region,
        price,
        name,
        address,
    }
    .render()?;
    Ok(EmailContent {
        subject,
        text,
        html,
    })
}

#[derive(Debug, Default)]
pub struct PriceAlertEmailFormatter;

impl PriceAlertFormatter for PriceAlertEmailFormatter {
    fn format_email(&self, alert: &PriceAlert) -> anyhow::Result<EmailContent> {
        Ok(price_alert_email(alert)?)
    }
}
