use crate::{station::CheapestStation, subscription::SubscriptionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Sent,
    Skipped,
    Failed,
}

/// The terminal state of a single subscription within one run.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationOutcome {
    pub subscription: SubscriptionKey,
    pub status: OutcomeStatus,
    pub detail: String,
    /// Only available if a price has been found.
    pub cheapest: Option<CheapestStation>,
}

impl NotificationOutcome {
    pub fn sent(
        subscription: SubscriptionKey,
        detail: impl Into<String>,
        cheapest: CheapestStation,
    ) -> Self {
        Self {
            subscription,
            status: OutcomeStatus::Sent,
            detail: detail.into(),
            cheapest: Some(cheapest),
        }
    }

    pub fn skipped(subscription: SubscriptionKey, detail: impl Into<String>) -> Self {
        Self {
            subscription,
            status: OutcomeStatus::Skipped,
            detail: detail.into(),
            cheapest: None,
        }
    }

    pub fn failed(
        subscription: SubscriptionKey,
        detail: impl Into<String>,
        cheapest: Option<CheapestStation>,
    ) -> Self {
        Self {
            subscription,
            status: OutcomeStatus::Failed,
            detail: detail.into(),
            cheapest,
        }
    }
}
