use super::prelude::*;
use crate::bbox::enclosing_bbox;

/// Looks up the outline of a suburb and returns its envelope.
///
/// The suburb name is upper-cased for the lookup,
/// the postcode is used as is.
pub fn resolve_suburb_bbox<G>(boundary_gateway: &G, suburb: &str, postcode: &str) -> Result<MapBbox>
where
    G: BoundaryGateway,
{
    let suburb = suburb.to_uppercase();
    log::debug!("Fetching boundary for {suburb}, {postcode}");
    let points = boundary_gateway.suburb_boundary(postcode, &suburb)?;
    let bbox = enclosing_bbox(points).ok_or_else(|| Error::BoundaryNotFound {
        suburb: suburb.clone(),
        postcode: postcode.to_owned(),
    })?;
    log::debug!(
        "Calculated bounding box for {suburb}, {postcode}: bottom-left = {}, top-right = {}",
        bbox.south_west(),
        bbox.north_east()
    );
    Ok(bbox)
}
