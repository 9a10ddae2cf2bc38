pub mod bbox;
pub mod gateways;
pub mod repositories;
pub mod usecases;

pub mod entities {
    pub use fuelwatch_entities::{
        email::*, fuel::*, geo::*, outcome::*, station::*, subscription::*,
    };
}
