use crate::{ensure_success, malformed_response, transport_error};
use fuelwatch_core::{
    entities::MapPoint,
    gateways::{boundary::BoundaryGateway, Error, Result},
};
use reqwest::{blocking::Client, Url};
use serde_json::Value;

pub const DEFAULT_API_BASE_URL: &str = "https://api.onegov.nsw.gov.au/SmartmeterDashboardApp";

/// Suburb boundaries provided by the NSW OneGov smart meter dashboard.
#[derive(Debug, Clone)]
pub struct OneGov {
    client: Client,
    api_base_url: Url,
}

impl OneGov {
    pub fn new(client: Client, api_base_url: &str) -> anyhow::Result<Self> {
        let api_base_url = Url::parse(api_base_url)?;
        if api_base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid OneGov API base URL: {api_base_url}");
        }
        Ok(Self {
            client,
            api_base_url,
        })
    }

    fn boundary_url(&self, postcode: &str, suburb: &str) -> Url {
        let mut url = self.api_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["suburbboundary", postcode, suburb]);
        }
        url
    }
}

impl BoundaryGateway for OneGov {
    fn suburb_boundary(&self, postcode: &str, suburb: &str) -> Result<Vec<MapPoint>> {
        let url = self.boundary_url(postcode, suburb);
        log::debug!("Requesting suburb boundary from {url}");
        let response = self.client.get(url).send().map_err(transport_error)?;
        let payload = ensure_success(response)?
            .text()
            .map_err(transport_error)?;
        parse_boundary(&payload)
    }
}

/// Extracts all positions of `GeoJson.geometry.coordinates`.
///
/// Missing geometry results in an empty list.
fn parse_boundary(payload: &str) -> Result<Vec<MapPoint>> {
    let json: Value =
        serde_json::from_str(payload).map_err(|err| malformed_response(err, payload))?;
    let Some(coordinates) = json.pointer("/GeoJson/geometry/coordinates") else {
        return Ok(vec![]);
    };
    let mut points = vec![];
    collect_positions(coordinates, &mut points).map_err(|err| malformed_response(err, payload))?;
    Ok(points)
}

// Walks flat position lists as well as (multi) polygon rings.
fn collect_positions(value: &Value, points: &mut Vec<MapPoint>) -> std::result::Result<(), String> {
    match value {
        Value::Null => Ok(()),
        Value::Array(items) => match items.first() {
            None => Ok(()),
            Some(Value::Number(_)) => {
                points.push(parse_position(items)?);
                Ok(())
            }
            Some(_) => items
                .iter()
                .try_for_each(|item| collect_positions(item, points)),
        },
        other => Err(format!("Unexpected coordinates: {other}")),
    }
}

// Positions are `[longitude, latitude, (altitude)]`.
fn parse_position(position: &[Value]) -> std::result::Result<MapPoint, String> {
    let (Some(lng), Some(lat)) = (
        position.first().and_then(Value::as_f64),
        position.get(1).and_then(Value::as_f64),
    ) else {
        return Err(format!("Invalid position: {position:?}"));
    };
    MapPoint::try_from_lat_lng_deg(lat, lng)
        .ok_or_else(|| format!("Position out of range: [{lng}, {lat}]"))
}
