use super::Result;
use crate::entities::{EmailAddress, EmailContent};

pub trait EmailGateway {
    fn send(&self, recipient: &EmailAddress, email: &EmailContent) -> Result<()>;
}
