use crate::entities::*;

/// Calculates the smallest axis-aligned box that encloses all points.
///
/// Returns `None` if there are no points at all. The box is just an
/// envelope of the given polygon and therefore usually also covers
/// some area outside of it.
pub fn enclosing_bbox<I>(points: I) -> Option<MapBbox>
where
    I: IntoIterator<Item = MapPoint>,
{
    let mut points = points.into_iter();
    let first = points.next()?;
    let (mut min_lat, mut min_lng) = first.to_lat_lng_deg();
    let (mut max_lat, mut max_lng) = (min_lat, min_lng);
    for pt in points {
        let (lat, lng) = pt.to_lat_lng_deg();
        if lat < min_lat {
            min_lat = lat;
        }
        if lat > max_lat {
            max_lat = lat;
        }
        if lng < min_lng {
            min_lng = lng;
        }
        if lng > max_lng {
            max_lng = lng;
        }
    }
    let bbox = MapBbox::new(
        MapPoint::from_lat_lng_deg(min_lat, min_lng),
        MapPoint::from_lat_lng_deg(max_lat, max_lng),
    );
    debug_assert!(bbox.is_valid());
    Some(bbox)
}
