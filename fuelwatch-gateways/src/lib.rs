//! HTTP adapters for the gateways of `fuelwatch-core`.

use fuelwatch_core::gateways::{Error, Result};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

pub mod email;
pub mod fuelcheck;
pub mod onegov;
pub mod user_communication;

/// Creates the HTTP client that is shared by all gateways.
///
/// The timeout applies to every single request.
pub fn http_client(timeout: Duration, user_agent: &str) -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

fn transport_error(err: reqwest::Error) -> Error {
    Error::Transport(err.into())
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(Error::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_owned(),
    })
}

fn malformed_response(reason: impl ToString, payload: &str) -> Error {
    let reason = reason.to_string();
    log::warn!("Malformed response ({reason}): {payload}");
    Error::malformed(reason, payload)
}
