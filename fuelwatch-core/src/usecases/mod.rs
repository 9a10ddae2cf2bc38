mod check_fuel_prices;
mod error;
mod find_cheapest_station;
mod resolve_suburb_bbox;
mod send_price_alert;

#[cfg(test)]
pub mod tests;

pub use self::{
    check_fuel_prices::*, error::Error, find_cheapest_station::*, resolve_suburb_bbox::*,
    send_price_alert::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        gateways::{
            boundary::BoundaryGateway, email::EmailGateway, prices::*, Error as GatewayError,
        },
        repositories::*,
    };
}
