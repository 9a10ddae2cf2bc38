use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Sent,
    Skipped,
    Failed,
}

/// The result of processing a single subscription.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Outcome {
    pub user_id        : String,
    /// Human readable `<suburb> <postcode>`
    pub subscription   : String,
    pub status         : OutcomeStatus,
    pub detail         : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheapest_price : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name           : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address        : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Message {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Error {
    pub error: String,
}
