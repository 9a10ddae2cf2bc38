use fuelwatch_core::gateways::{email::EmailGateway, Error, Result};
use fuelwatch_entities::email::*;
use jfs::Store;
use serde::{Deserialize, Serialize};
use std::{
    io,
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};
use time::OffsetDateTime;

/// A dummy email gateway for local testing.
pub struct SendToJsonFile {
    json_store: Store,
    sequence: AtomicU64,
}

impl SendToJsonFile {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self {
            json_store,
            sequence: AtomicU64::new(0),
        })
    }
    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonEmail {
    to: String,
    subject: String,
    text: String,
    html: String,
}

impl JsonEmail {
    fn new(to: &EmailAddress, content: &EmailContent) -> Self {
        let EmailContent {
            subject,
            text,
            html,
        } = content.clone();
        let to = to.as_str().to_owned();
        Self {
            to,
            subject,
            text,
            html,
        }
    }
}

/// File name of a stored e-mail.
///
/// The store appends `.json` as extension, so the key must not contain dots.
fn file_key(millis: i128, sequence: u64, recipient: &EmailAddress) -> String {
    let recipient = recipient.as_str().replace('.', "_");
    format!("{millis}-{sequence}-{recipient}")
}

impl EmailGateway for SendToJsonFile {
    fn send(&self, recipient: &EmailAddress, content: &EmailContent) -> Result<()> {
        let now = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let key = file_key(now, sequence, recipient);
        let email = JsonEmail::new(recipient, content);
        self.json_store
            .save_with_id(&email, &key)
            .map_err(|err| {
                log::warn!("Unable to save email in JSON file: {err}");
                Error::Transport(err.into())
            })?;
        log::debug!("Saved e-mail to {recipient} in {}", self.path().display());
        Ok(())
    }
}
