use super::{find_cheapest_station::*, prelude::*, resolve_suburb_bbox::*, send_price_alert::*};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy)]
pub struct PriceCheckParams<'a> {
    pub eligible_fuel_types: &'a EligibleFuelTypes,
    /// Search radius in kilometers.
    pub search_radius: u32,
    /// If set no further subscriptions are processed.
    pub abort: Option<&'a AtomicBool>,
}

impl PriceCheckParams<'_> {
    fn aborted(&self) -> bool {
        self.abort.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Checks the fuel prices for every subscription and notifies the subscribers.
///
/// Subscriptions are processed one after another. The returned
/// outcomes have the same order as the loaded subscriptions.
/// Only a failure to load the subscriptions is returned as an error.
pub fn check_fuel_prices<R, B, P, E, F>(
    repo: &R,
    boundary_gateway: &B,
    price_gateway: &P,
    email_gateway: &E,
    formatter: &F,
    params: PriceCheckParams,
) -> Result<Vec<NotificationOutcome>>
where
    R: SubscriptionRepo,
    B: BoundaryGateway,
    P: FuelPriceGateway,
    E: EmailGateway,
    F: PriceAlertFormatter,
{
    let subscriptions = repo.all_subscriptions()?;
    if subscriptions.is_empty() {
        log::info!("No subscriptions found");
        return Ok(vec![]);
    }
    log::info!("Found {} subscriptions", subscriptions.len());

    let outcomes: Vec<_> = subscriptions
        .iter()
        .map(|subscription| {
            if params.aborted() {
                return NotificationOutcome::skipped(subscription.key(), "run aborted");
            }
            check_subscription(
                subscription,
                boundary_gateway,
                price_gateway,
                email_gateway,
                formatter,
                &params,
            )
        })
        .collect();

    let count = |status: OutcomeStatus| outcomes.iter().filter(|o| o.status == status).count();
    log::info!(
        "Checked {} subscriptions: {} sent, {} skipped, {} failed",
        outcomes.len(),
        count(OutcomeStatus::Sent),
        count(OutcomeStatus::Skipped),
        count(OutcomeStatus::Failed)
    );
    Ok(outcomes)
}

fn check_subscription<B, P, E, F>(
    subscription: &Subscription,
    boundary_gateway: &B,
    price_gateway: &P,
    email_gateway: &E,
    formatter: &F,
    params: &PriceCheckParams,
) -> NotificationOutcome
where
    B: BoundaryGateway,
    P: FuelPriceGateway,
    E: EmailGateway,
    F: PriceAlertFormatter,
{
    let key = subscription.key();
    let recipient = match &subscription.email {
        Some(email) if subscription.is_processable() => email,
        _ => {
            log::info!("Skipping incomplete subscription {key}");
            return NotificationOutcome::skipped(key, "incomplete subscription");
        }
    };
    let cheapest = match lookup_cheapest_station(
        subscription,
        boundary_gateway,
        price_gateway,
        params,
    ) {
        Ok(cheapest) => cheapest,
        Err(err) => {
            log::warn!("Skipping subscription {key}: {err}");
            return NotificationOutcome::skipped(key, err.to_string());
        }
    };
    let alert = PriceAlert {
        region: &subscription.suburb,
        cheapest: &cheapest,
    };
    match send_price_alert(email_gateway, formatter, recipient, &alert) {
        Delivery::Sent => {
            NotificationOutcome::sent(key, format!("Price alert sent to {recipient}"), cheapest)
        }
        Delivery::Failed(reason) => NotificationOutcome::failed(key, reason, Some(cheapest)),
    }
}

fn lookup_cheapest_station<B, P>(
    subscription: &Subscription,
    boundary_gateway: &B,
    price_gateway: &P,
    params: &PriceCheckParams,
) -> Result<CheapestStation>
where
    B: BoundaryGateway,
    P: FuelPriceGateway,
{
    let Subscription {
        suburb, postcode, ..
    } = subscription;
    let bbox = resolve_suburb_bbox(boundary_gateway, suburb, postcode)?;
    let area = SearchArea {
        bbox,
        suburb,
        postcode,
        radius: params.search_radius,
    };
    find_cheapest_station(price_gateway, &area, params.eligible_fuel_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;
    use fuelwatch_entities::builders::*;

    const WOONONA: &[[f64; 2]] = &[[151.0, -34.3], [151.05, -34.35], [150.98, -34.28]];
    const THIRROUL: &[[f64; 2]] = &[[150.91, -34.31], [150.93, -34.33]];
    const BULLI: &[[f64; 2]] = &[[150.9, -34.33]];
    const AUSTINMER: &[[f64; 2]] = &[[150.92, -34.30], [150.94, -34.31]];

    fn subscription(user_id: &str, suburb: &str, postcode: &str, email: &str) -> Subscription {
        Subscription::build()
            .user_id(user_id)
            .suburb(suburb)
            .postcode(postcode)
            .email(Some(email))
            .finish()
    }

    fn station(name: &str, fuel_type: FuelType, price: f64) -> Station {
        Station::build()
            .name(name)
            .address(&format!("{name} Street"))
            .price(fuel_type, price)
            .finish()
    }

    struct Fixture {
        db: MockDb,
        boundary_gw: MockBoundaryGw,
        price_gw: MockPriceGw,
        email_gw: MockEmailGw,
        eligible: EligibleFuelTypes,
    }

    impl Fixture {
        fn new(subscriptions: Vec<Subscription>) -> Self {
            Self {
                db: MockDb::with_subscriptions(subscriptions),
                boundary_gw: MockBoundaryGw::default(),
                price_gw: MockPriceGw::default(),
                email_gw: MockEmailGw::default(),
                eligible: EligibleFuelTypes::default(),
            }
        }

        fn run(&self, abort: Option<&AtomicBool>) -> Result<Vec<NotificationOutcome>> {
            let params = PriceCheckParams {
                eligible_fuel_types: &self.eligible,
                search_radius: 4,
                abort,
            };
            check_fuel_prices(
                &self.db,
                &self.boundary_gw,
                &self.price_gw,
                &self.email_gw,
                &MockFormatter,
                params,
            )
        }
    }

    #[test]
    fn notify_subscriber_about_cheapest_price() {
        let mut fixture = Fixture::new(vec![subscription(
            "1",
            "Woonona",
            "2517",
            "driver@example.com",
        )]);
        fixture.boundary_gw = fixture.boundary_gw.with_boundary("2517", "WOONONA", WOONONA);
        fixture.price_gw = fixture.price_gw.with_stations(
            "2517",
            vec![
                station("A", FuelType::Ethanol10, 2.10),
                station("B", FuelType::Unleaded91, 2.05),
            ],
        );

        let outcomes = fixture.run(None).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Sent);
        assert_eq!(outcomes[0].subscription.user_id, "1");
        let cheapest = outcomes[0].cheapest.as_ref().unwrap();
        assert_eq!(cheapest.name, "B");
        assert_eq!(cheapest.price, 2.05);

        let queries = fixture.price_gw.queries.borrow();
        assert_eq!(queries[0].bbox.south_west().to_lat_lng_deg(), (-34.35, 150.98));
        assert_eq!(queries[0].bbox.north_east().to_lat_lng_deg(), (-34.28, 151.05));

        let sent = fixture.email_gw.sent_mails.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.as_str(), "driver@example.com");
        assert_eq!(sent[0].1.subject, "Woonona");
    }

    #[test]
    fn isolate_failures_of_single_subscriptions() {
        let subscriptions = vec![
            subscription("1", "Woonona", "2517", "a@example.com"),
            subscription("2", "Nowhere", "9999", "b@example.com"),
            subscription("3", "Thirroul", "2515", "c@example.com"),
            subscription("4", "Bulli", "2516", "d@example.com"),
            subscription("5", "Austinmer", "2515", "bounce@example.com"),
            Subscription::build()
                .user_id("6")
                .suburb("Woonona")
                .postcode("2517")
                .finish(),
            subscription("7", "Woonona", "2517", "g@example.com"),
        ];
        let mut fixture = Fixture::new(subscriptions);
        fixture.boundary_gw = fixture
            .boundary_gw
            .with_boundary("2517", "WOONONA", WOONONA)
            .with_boundary("2515", "THIRROUL", THIRROUL)
            .with_boundary("2516", "BULLI", BULLI)
            .with_boundary("2515", "AUSTINMER", AUSTINMER);
        fixture.price_gw = fixture
            .price_gw
            .with_stations("2517", vec![station("A", FuelType::Ethanol10, 1.99)])
            .with_stations(
                "2515",
                vec![
                    station("B", FuelType::Premium95, 2.20),
                    station("C", FuelType::Unleaded91, 2.01),
                ],
            )
            .with_failure("2516");
        fixture.email_gw = fixture.email_gw.with_rejected("bounce@example.com");

        let outcomes = fixture.run(None).unwrap();

        let user_ids: Vec<_> = outcomes
            .iter()
            .map(|o| o.subscription.user_id.as_str())
            .collect();
        assert_eq!(user_ids, ["1", "2", "3", "4", "5", "6", "7"]);

        let statuses: Vec<_> = outcomes.iter().map(|o| o.status).collect();
        use OutcomeStatus::*;
        assert_eq!(
            statuses,
            [Sent, Skipped, Sent, Skipped, Failed, Skipped, Sent]
        );
        assert!(outcomes[1].detail.contains("No boundary found"));
        assert!(outcomes[3].detail.contains("503"));
        assert!(outcomes[4].detail.contains("400"));
        assert_eq!(outcomes[5].detail, "incomplete subscription");
        assert_eq!(outcomes[4].cheapest.as_ref().unwrap().name, "C");
        assert_eq!(fixture.email_gw.sent_mails.borrow().len(), 3);
    }

    #[test]
    fn skip_subscription_without_eligible_prices() {
        let mut fixture = Fixture::new(vec![subscription(
            "1",
            "Woonona",
            "2517",
            "a@example.com",
        )]);
        fixture.boundary_gw = fixture.boundary_gw.with_boundary("2517", "WOONONA", WOONONA);
        fixture.price_gw = fixture
            .price_gw
            .with_stations("2517", vec![station("A", FuelType::Premium95, 2.50)]);

        let outcomes = fixture.run(None).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Skipped);
        assert_eq!(outcomes[0].detail, "No eligible fuel prices found");
        assert!(fixture.email_gw.sent_mails.borrow().is_empty());
    }

    #[test]
    fn incomplete_subscription_does_not_query_any_gateway() {
        let fixture = Fixture::new(vec![Subscription::build()
            .user_id("1")
            .suburb("Woonona")
            .email(Some("a@example.com"))
            .finish()]);
        let outcomes = fixture.run(None).unwrap();
        assert_eq!(outcomes[0].status, OutcomeStatus::Skipped);
        assert!(fixture.boundary_gw.requests.borrow().is_empty());
        assert!(fixture.price_gw.queries.borrow().is_empty());
    }

    #[test]
    fn no_subscriptions() {
        let fixture = Fixture::new(vec![]);
        assert!(fixture.run(None).unwrap().is_empty());
    }

    #[test]
    fn fail_if_subscriptions_cannot_be_loaded() {
        let mut fixture = Fixture::new(vec![subscription(
            "1",
            "Woonona",
            "2517",
            "a@example.com",
        )]);
        fixture.db.unavailable = true;
        let err = fixture.run(None).unwrap_err();
        assert!(matches!(err, Error::Repo(_)));
        assert!(fixture.boundary_gw.requests.borrow().is_empty());
    }

    #[test]
    fn stop_processing_after_abort() {
        let mut fixture = Fixture::new(vec![
            subscription("1", "Woonona", "2517", "a@example.com"),
            subscription("2", "Woonona", "2517", "b@example.com"),
        ]);
        fixture.boundary_gw = fixture.boundary_gw.with_boundary("2517", "WOONONA", WOONONA);
        fixture.price_gw = fixture
            .price_gw
            .with_stations("2517", vec![station("A", FuelType::Ethanol10, 1.99)]);
        let abort = AtomicBool::new(true);

        let outcomes = fixture.run(Some(&abort)).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes
            .iter()
            .all(|o| o.status == OutcomeStatus::Skipped && o.detail == "run aborted"));
        assert!(fixture.boundary_gw.requests.borrow().is_empty());
        assert!(fixture.email_gw.sent_mails.borrow().is_empty());
    }
}
