use crate::fuel::FuelType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub fuel_type: FuelType,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub address: String,
    pub prices: Vec<PriceQuote>,
}

/// The station offering the lowest eligible price.
#[derive(Debug, Clone, PartialEq)]
pub struct CheapestStation {
    pub price: f64,
    pub name: String,
    pub address: String,
}
