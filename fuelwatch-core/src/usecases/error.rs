use crate::{gateways, repositories};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No boundary found for {suburb} {postcode}")]
    BoundaryNotFound { suburb: String, postcode: String },
    #[error("No eligible fuel prices found")]
    NoStations,
    #[error(transparent)]
    Gateway(#[from] gateways::Error),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
