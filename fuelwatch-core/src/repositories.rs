// Low-level storage access traits.
// Subscriptions are managed by another application,
// this crate only needs read access.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The storage backend is not available")]
    Unavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait SubscriptionRepo {
    fn all_subscriptions(&self) -> Result<Vec<Subscription>>;
}
