use super::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SearchArea<'a> {
    pub bbox: MapBbox,
    pub suburb: &'a str,
    pub postcode: &'a str,
    /// Search radius in kilometers.
    pub radius: u32,
}

/// Queries the prices within the given area and picks the cheapest station.
///
/// The upstream fuel type filter is not trusted: all quotes
/// are filtered again locally.
pub fn find_cheapest_station<G>(
    price_gateway: &G,
    area: &SearchArea,
    eligible_fuel_types: &EligibleFuelTypes,
) -> Result<CheapestStation>
where
    G: FuelPriceGateway,
{
    let SearchArea {
        bbox,
        suburb,
        postcode,
        radius,
    } = *area;
    let query = PriceQuery {
        bbox,
        fuel_types: eligible_fuel_types.to_filter_param(),
        radius,
        suburb,
        postcode,
    };
    let stations = price_gateway.stations(&query)?;
    log::debug!(
        "Received prices of {} stations around {suburb}, {postcode}",
        stations.len()
    );
    let cheapest = cheapest_station(&stations, eligible_fuel_types).ok_or(Error::NoStations)?;
    log::debug!(
        "Cheapest fuel price around {suburb}, {postcode}: {} at {} ({})",
        cheapest.price,
        cheapest.name,
        cheapest.address
    );
    Ok(cheapest)
}

/// The lowest price among all eligible quotes of a station.
pub fn effective_price(station: &Station, eligible_fuel_types: &EligibleFuelTypes) -> Option<f64> {
    station
        .prices
        .iter()
        .filter(|quote| eligible_fuel_types.contains(quote.fuel_type))
        .map(|quote| quote.price)
        .reduce(f64::min)
}

/// Picks the station with the lowest effective price.
///
/// Stations without any eligible quote are ignored.
/// On equal prices the first station wins.
pub fn cheapest_station(
    stations: &[Station],
    eligible_fuel_types: &EligibleFuelTypes,
) -> Option<CheapestStation> {
    let mut cheapest: Option<(f64, &Station)> = None;
    for station in stations {
        let Some(price) = effective_price(station, eligible_fuel_types) else {
            continue;
        };
        if cheapest.map_or(true, |(min_price, _)| price < min_price) {
            cheapest = Some((price, station));
        }
    }
    cheapest.map(|(price, station)| CheapestStation {
        price,
        name: station.name.clone(),
        address: station.address.clone(),
    })
}
