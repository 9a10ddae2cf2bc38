use super::*;
use fuelwatch_entities as e;

impl From<e::outcome::OutcomeStatus> for OutcomeStatus {
    fn from(from: e::outcome::OutcomeStatus) -> Self {
        use e::outcome::OutcomeStatus as E;
        match from {
            E::Sent => Self::Sent,
            E::Skipped => Self::Skipped,
            E::Failed => Self::Failed,
        }
    }
}

impl From<e::outcome::NotificationOutcome> for Outcome {
    fn from(from: e::outcome::NotificationOutcome) -> Self {
        let e::outcome::NotificationOutcome {
            subscription,
            status,
            detail,
            cheapest,
        } = from;
        let e::subscription::SubscriptionKey {
            user_id,
            suburb,
            postcode,
        } = subscription;
        let (cheapest_price, name, address) = match cheapest {
            Some(e::station::CheapestStation {
                price,
                name,
                address,
            }) => (Some(price), Some(name), Some(address)),
            None => (None, None, None),
        };
        Self {
            user_id,
            subscription: format!("{suburb} {postcode}"),
            status: status.into(),
            detail,
            cheapest_price,
            name,
            address,
        }
    }
}
