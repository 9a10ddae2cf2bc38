use std::fmt;

/// Latitude in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    const DEG_MAX: f64 = 90.0;
    const DEG_MIN: f64 = -90.0;

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        (Self::DEG_MIN..=Self::DEG_MAX).contains(&self.0)
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let res = Self(deg.into());
        res.is_valid().then_some(res)
    }
}

impl fmt::Display for LatCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Longitude in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    const DEG_MAX: f64 = 180.0;
    const DEG_MIN: f64 = -180.0;

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        (Self::DEG_MIN..=Self::DEG_MAX).contains(&self.0)
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let res = Self(deg.into());
        res.is_valid().then_some(res)
    }
}

impl fmt::Display for LngCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A geographical location on a (flat) map.
///
/// Boundary data usually lists positions as `[longitude, latitude]`,
/// i.e. in the opposite order of the constructor arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// An axis-aligned rectangle spanned by its south-west (bottom left)
/// and north-east (top right) corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    pub const fn south_west(&self) -> MapPoint {
        self.sw
    }

    pub const fn north_east(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid()
            && self.ne.is_valid()
            && self.sw.lat() <= self.ne.lat()
            && self.sw.lng() <= self.ne.lng()
    }
}

impl fmt::Display for MapBbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.sw, self.ne)
    }
}
