use super::Result;
use crate::entities::{MapBbox, Station};

#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuery<'a> {
    pub bbox: MapBbox,
    /// Presentation string of the requested fuel types, e.g. `E10-U91`.
    pub fuel_types: String,
    /// Search radius in kilometers.
    pub radius: u32,
    pub suburb: &'a str,
    pub postcode: &'a str,
}

pub trait FuelPriceGateway {
    fn stations(&self, query: &PriceQuery) -> Result<Vec<Station>>;
}
