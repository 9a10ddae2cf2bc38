use fuelwatch_core::entities::{EmailAddress, Subscription};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct SubscriptionRow {
    pub user_id: Value,
    #[serde(default)]
    pub postcode: Option<Value>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub users: Option<UserRow>,
}

#[derive(Debug, Deserialize)]
pub struct UserRow {
    pub email: Option<String>,
}

// Postcodes and ids might be stored as numbers.
fn text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

impl From<SubscriptionRow> for Subscription {
    fn from(from: SubscriptionRow) -> Self {
        let SubscriptionRow {
            user_id,
            postcode,
            suburb,
            users,
        } = from;
        let user_id = text(Some(user_id));
        let email = users.and_then(|u| u.email).and_then(|email| {
            email
                .parse::<EmailAddress>()
                .map_err(|err| log::warn!("Invalid e-mail address of user {user_id}: {err}"))
                .ok()
        });
        Self {
            user_id,
            postcode: text(postcode),
            suburb: suburb.unwrap_or_default(),
            email,
        }
    }
}
