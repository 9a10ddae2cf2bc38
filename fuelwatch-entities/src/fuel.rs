use itertools::Itertools;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Fuel type codes as published by NSW FuelCheck.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum FuelType {
    #[strum(serialize = "E10")] Ethanol10,
    #[strum(serialize = "U91")] Unleaded91,
    #[strum(serialize = "E85")] Ethanol85,
    #[strum(serialize = "P95")] Premium95,
    #[strum(serialize = "P98")] Premium98,
    #[strum(serialize = "DL")]  Diesel,
    #[strum(serialize = "PDL")] PremiumDiesel,
    #[strum(serialize = "B20")] Biodiesel20,
    #[strum(serialize = "LPG")] Lpg,
    #[strum(serialize = "CNG")] Cng,
    #[strum(serialize = "LNG")] Lng,
    #[strum(serialize = "EV")]  Electric,
    #[strum(serialize = "H2")]  Hydrogen,
}

impl FuelType {
    pub fn code(&self) -> &str {
        self.as_ref()
    }
}

/// The fuel types considered when looking for the cheapest price.
///
/// The order of the configured types is preserved,
/// duplicates are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleFuelTypes(Vec<FuelType>);

impl EligibleFuelTypes {
    pub fn new<I>(fuel_types: I) -> Self
    where
        I: IntoIterator<Item = FuelType>,
    {
        Self(fuel_types.into_iter().unique().collect())
    }

    pub fn contains(&self, fuel_type: FuelType) -> bool {
        self.0.contains(&fuel_type)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuelType> {
        self.0.iter()
    }

    /// Filter value for upstream queries, e.g. `E10-U91`.
    pub fn to_filter_param(&self) -> String {
        self.0.iter().map(FuelType::code).join("-")
    }
}

impl Default for EligibleFuelTypes {
    fn default() -> Self {
        Self::new([FuelType::Ethanol10, FuelType::Unleaded91])
    }
}
