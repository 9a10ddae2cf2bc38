//! Read access to the subscriptions stored in Supabase.
//!
//! Supabase exposes its tables through PostgREST, so the
//! subscriptions are loaded with a plain HTTP request.

use anyhow::anyhow;
use fuelwatch_core::{
    entities::*,
    repositories::{Error as RepoError, SubscriptionRepo},
};
use reqwest::{blocking::Client, header};

mod models;

use models::SubscriptionRow;

pub const DEFAULT_TABLE: &str = "subscriptions";

// The e-mail address is joined from the users table.
const SELECT_COLUMNS: &str = "user_id,postcode,suburb,users(email)";

#[derive(Debug, Clone)]
pub struct Supabase {
    client: Client,
    url: String,
    api_key: String,
    table: String,
}

impl Supabase {
    pub fn new(
        client: Client,
        url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

impl SubscriptionRepo for Supabase {
    fn all_subscriptions(&self) -> Result<Vec<Subscription>, RepoError> {
        let url = self.table_url();
        log::debug!("Loading subscriptions from {url}");
        let response = self
            .client
            .get(&url)
            .query(&[("select", SELECT_COLUMNS)])
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
            .send()
            .map_err(|err| RepoError::Other(err.into()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            log::warn!("Failed to load subscriptions ({status}): {body}");
            return Err(RepoError::Other(anyhow!(
                "Unexpected response status {status}"
            )));
        }
        let payload = response
            .text()
            .map_err(|err| RepoError::Other(err.into()))?;
        parse_subscriptions(&payload)
    }
}

fn parse_subscriptions(payload: &str) -> Result<Vec<Subscription>, RepoError> {
    let rows: Vec<SubscriptionRow> = serde_json::from_str(payload).map_err(|err| {
        log::warn!("Malformed subscriptions ({err}): {payload}");
        RepoError::Other(err.into())
    })?;
    Ok(rows.into_iter().map(Subscription::from).collect())
}
