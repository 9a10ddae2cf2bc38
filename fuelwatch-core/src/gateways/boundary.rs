use super::Result;
use crate::entities::MapPoint;

pub trait BoundaryGateway {
    /// Fetches the outline of a suburb.
    ///
    /// An empty list is returned if the source has no geometry
    /// for the requested suburb.
    fn suburb_boundary(&self, postcode: &str, suburb: &str) -> Result<Vec<MapPoint>>;
}
