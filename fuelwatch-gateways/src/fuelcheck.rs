use crate::{ensure_success, malformed_response, transport_error};
use fuelwatch_core::{
    entities::{FuelType, PriceQuote, Station},
    gateways::{prices::*, Result},
};
use reqwest::{blocking::Client, header};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str =
    "https://www.fuelcheck.nsw.gov.au/fuel/api/v1/fuel/prices/bylocation";

/// Fuel prices published by NSW FuelCheck.
#[derive(Debug, Clone)]
pub struct FuelCheck {
    client: Client,
    api_url: String,
}

impl FuelCheck {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StationJson {
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    prices: Vec<PriceJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PriceJson {
    fuel_type: String,
    price: Option<f64>,
}

impl From<StationJson> for Station {
    fn from(from: StationJson) -> Self {
        let StationJson {
            name,
            address,
            prices,
        } = from;
        let prices = prices
            .into_iter()
            .filter_map(|PriceJson { fuel_type, price }| {
                let Ok(fuel_type) = fuel_type.parse::<FuelType>() else {
                    log::debug!("Ignoring price of unknown fuel type '{fuel_type}' at {name}");
                    return None;
                };
                price.map(|price| PriceQuote { fuel_type, price })
            })
            .collect();
        Self {
            name,
            address,
            prices,
        }
    }
}

fn query_params(query: &PriceQuery) -> Vec<(&'static str, String)> {
    let PriceQuery {
        bbox,
        fuel_types,
        radius,
        suburb,
        postcode,
    } = query;
    let (bottom_left_lat, bottom_left_lng) = bbox.south_west().to_lat_lng_deg();
    let (top_right_lat, top_right_lng) = bbox.north_east().to_lat_lng_deg();
    vec![
        ("bottomLeftLatitude", bottom_left_lat.to_string()),
        ("bottomLeftLongitude", bottom_left_lng.to_string()),
        ("topRightLatitude", top_right_lat.to_string()),
        ("topRightLongitude", top_right_lng.to_string()),
        ("fuelType", fuel_types.clone()),
        ("radius", radius.to_string()),
        ("suburb", suburb.to_string()),
        ("postcode", postcode.to_string()),
    ]
}

fn parse_stations(payload: &str) -> Result<Vec<Station>> {
    let stations: Vec<StationJson> =
        serde_json::from_str(payload).map_err(|err| malformed_response(err, payload))?;
    Ok(stations.into_iter().map(Station::from).collect())
}

impl FuelPriceGateway for FuelCheck {
    fn stations(&self, query: &PriceQuery) -> Result<Vec<Station>> {
        log::debug!(
            "Requesting {} prices around {}, {} within {}",
            query.fuel_types,
            query.suburb,
            query.postcode,
            query.bbox
        );
        let response = self
            .client
            .get(&self.api_url)
            .header(header::ACCEPT, "application/json")
            .query(&query_params(query))
            .send()
            .map_err(transport_error)?;
        let payload = ensure_success(response)?
            .text()
            .map_err(transport_error)?;
        parse_stations(&payload)
    }
}
