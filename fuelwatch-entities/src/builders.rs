pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{station_builder::*, subscription_builder::*};

pub mod station_builder {

    use super::*;
    use crate::{fuel::*, station::*};

    #[derive(Debug)]
    pub struct StationBuild {
        station: Station,
    }

    impl StationBuild {
        pub fn name(mut self, name: &str) -> Self {
            self.station.name = name.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.station.address = address.into();
            self
        }
        pub fn price(mut self, fuel_type: FuelType, price: f64) -> Self {
            self.station.prices.push(PriceQuote { fuel_type, price });
            self
        }
        pub fn finish(self) -> Station {
            self.station
        }
    }

    impl Builder for Station {
        type Build = StationBuild;
        fn build() -> StationBuild {
            StationBuild {
                station: Station {
                    name: "".into(),
                    address: "".into(),
                    prices: vec![],
                },
            }
        }
    }
}

pub mod subscription_builder {

    use super::*;
    use crate::subscription::*;

    #[derive(Debug)]
    pub struct SubscriptionBuild {
        subscription: Subscription,
    }

    impl SubscriptionBuild {
        pub fn user_id(mut self, user_id: &str) -> Self {
            self.subscription.user_id = user_id.into();
            self
        }
        pub fn postcode(mut self, postcode: &str) -> Self {
            self.subscription.postcode = postcode.into();
            self
        }
        pub fn suburb(mut self, suburb: &str) -> Self {
            self.subscription.suburb = suburb.into();
            self
        }
        pub fn email(mut self, email: Option<&str>) -> Self {
            self.subscription.email = email.map(|e| e.parse().unwrap());
            self
        }
        pub fn finish(self) -> Subscription {
            self.subscription
        }
    }

    impl Builder for Subscription {
        type Build = SubscriptionBuild;
        fn build() -> Self::Build {
            SubscriptionBuild {
                subscription: Subscription {
                    user_id: "".into(),
                    postcode: "".into(),
                    suburb: "".into(),
                    email: None,
                },
            }
        }
    }

    #[test]
    fn build_processable_subscription() {
        let s = Subscription::build()
            .suburb("Woonona")
            .postcode("2517")
            .finish();
        assert!(!s.is_processable());
        let s = Subscription::build()
            .suburb("Woonona")
            .postcode("2517")
            .email(Some("driver@example.com"))
            .finish();
        assert!(s.is_processable());
    }
}
