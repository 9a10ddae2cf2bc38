use super::{prelude::*, PriceAlert, PriceAlertFormatter};
use crate::repositories::Error as RepoError;
use anyhow::anyhow;
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

#[derive(Default)]
pub struct MockDb {
    pub subscriptions: RefCell<Vec<Subscription>>,
    pub unavailable: bool,
}

impl MockDb {
    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions: RefCell::new(subscriptions),
            unavailable: false,
        }
    }
}

impl SubscriptionRepo for MockDb {
    fn all_subscriptions(&self) -> std::result::Result<Vec<Subscription>, RepoError> {
        if self.unavailable {
            return Err(RepoError::Unavailable);
        }
        Ok(self.subscriptions.borrow().clone())
    }
}

#[derive(Default)]
pub struct MockBoundaryGw {
    /// Keyed by (postcode, suburb)
    pub boundaries: HashMap<(String, String), Vec<MapPoint>>,
    pub offline: bool,
    pub requests: RefCell<Vec<(String, String)>>,
}

impl MockBoundaryGw {
    /// Coordinates are given as `[longitude, latitude]`.
    pub fn with_boundary(mut self, postcode: &str, suburb: &str, coords: &[[f64; 2]]) -> Self {
        let points = coords
            .iter()
            .map(|[lng, lat]| MapPoint::from_lat_lng_deg(*lat, *lng))
            .collect();
        self.boundaries
            .insert((postcode.to_owned(), suburb.to_owned()), points);
        self
    }
}

impl BoundaryGateway for MockBoundaryGw {
    fn suburb_boundary(
        &self,
        postcode: &str,
        suburb: &str,
    ) -> std::result::Result<Vec<MapPoint>, GatewayError> {
        self.requests
            .borrow_mut()
            .push((postcode.to_owned(), suburb.to_owned()));
        if self.offline {
            return Err(GatewayError::Transport(anyhow!("operation timed out")));
        }
        let key = (postcode.to_owned(), suburb.to_owned());
        Ok(self.boundaries.get(&key).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub bbox: MapBbox,
    pub fuel_types: String,
    pub radius: u32,
    pub suburb: String,
    pub postcode: String,
}

#[derive(Default)]
pub struct MockPriceGw {
    /// Keyed by postcode
    pub stations: HashMap<String, Vec<Station>>,
    pub failing_postcodes: HashSet<String>,
    pub queries: RefCell<Vec<RecordedQuery>>,
}

impl MockPriceGw {
    pub fn with_stations(mut self, postcode: &str, stations: Vec<Station>) -> Self {
        self.stations.insert(postcode.to_owned(), stations);
        self
    }
    pub fn with_failure(mut self, postcode: &str) -> Self {
        self.failing_postcodes.insert(postcode.to_owned());
        self
    }
}

impl FuelPriceGateway for MockPriceGw {
    fn stations(&self, query: &PriceQuery) -> std::result::Result<Vec<Station>, GatewayError> {
        self.queries.borrow_mut().push(RecordedQuery {
            bbox: query.bbox,
            fuel_types: query.fuel_types.clone(),
            radius: query.radius,
            suburb: query.suburb.to_owned(),
            postcode: query.postcode.to_owned(),
        });
        if self.failing_postcodes.contains(query.postcode) {
            return Err(GatewayError::Status {
                status: 503,
                reason: "Service Unavailable".into(),
            });
        }
        Ok(self
            .stations
            .get(query.postcode)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockEmailGw {
    pub sent_mails: RefCell<Vec<(EmailAddress, EmailContent)>>,
    pub rejected: HashSet<String>,
    pub offline: bool,
}

impl MockEmailGw {
    pub fn with_rejected(mut self, address: &str) -> Self {
        self.rejected.insert(address.to_owned());
        self
    }
}

impl EmailGateway for MockEmailGw {
    fn send(
        &self,
        recipient: &EmailAddress,
        email: &EmailContent,
    ) -> std::result::Result<(), GatewayError> {
        if self.offline {
            return Err(GatewayError::Transport(anyhow!("connection refused")));
        }
        if self.rejected.contains(recipient.as_str()) {
            return Err(GatewayError::Status {
                status: 400,
                reason: "to parameter is not a valid address".into(),
            });
        }
        self.sent_mails
            .borrow_mut()
            .push((recipient.clone(), email.clone()));
        Ok(())
    }
}

pub struct MockFormatter;

impl PriceAlertFormatter for MockFormatter {
    fn format_email(&self, alert: &PriceAlert) -> anyhow::Result<EmailContent> {
        Ok(EmailContent {
            subject: alert.region.to_owned(),
            text: format!("{:.2}", alert.cheapest.price),
            html: alert.cheapest.name.clone(),
        })
    }
}
