use crate::email::EmailAddress;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub user_id: String,
    pub postcode: String,
    pub suburb: String,
    pub email: Option<EmailAddress>,
}

impl Subscription {
    /// Subscriptions without a recipient or a region are never processed.
    pub fn is_processable(&self) -> bool {
        self.email.is_some() && !self.postcode.trim().is_empty() && !self.suburb.trim().is_empty()
    }

    pub fn key(&self) -> SubscriptionKey {
        SubscriptionKey {
            user_id: self.user_id.clone(),
            suburb: self.suburb.clone(),
            postcode: self.postcode.clone(),
        }
    }
}

/// Identifies a subscription within the results of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionKey {
    pub user_id: String,
    pub suburb: String,
    pub postcode: String,
}

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            user_id,
            suburb,
            postcode,
        } = self;
        write!(f, "{suburb} {postcode} ({user_id})")
    }
}
