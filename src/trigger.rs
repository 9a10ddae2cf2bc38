use fuelwatch_boundary as json;
use fuelwatch_core::{
    gateways::{boundary::BoundaryGateway, email::EmailGateway, prices::FuelPriceGateway},
    repositories::SubscriptionRepo,
    usecases::{self, PriceAlertFormatter, PriceCheckParams},
};
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

/// Event that starts a single run.
#[derive(Debug, Default)]
pub struct TriggerEvent {
    /// The time of the following scheduled run.
    pub next_run: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub status_code: u16,
    pub body: Value,
}

pub struct Pipeline<'a, R, B, P, E, F> {
    pub repo: &'a R,
    pub boundary_gateway: &'a B,
    pub price_gateway: &'a P,
    pub email_gateway: &'a E,
    pub formatter: &'a F,
}

const NO_SUBSCRIPTIONS_MESSAGE: &str = "No subscriptions found.";
const TOTAL_FAILURE_MESSAGE: &str = "Failed to fetch fuel prices";

pub fn handle<R, B, P, E, F>(
    event: &TriggerEvent,
    pipeline: &Pipeline<R, B, P, E, F>,
    params: PriceCheckParams,
) -> TriggerResponse
where
    R: SubscriptionRepo,
    B: BoundaryGateway,
    P: FuelPriceGateway,
    E: EmailGateway,
    F: PriceAlertFormatter,
{
    if let Some(next_run) = event.next_run {
        log::info!("Next function run at {next_run}");
    }
    let Pipeline {
        repo,
        boundary_gateway,
        price_gateway,
        email_gateway,
        formatter,
    } = pipeline;
    match usecases::check_fuel_prices(
        *repo,
        *boundary_gateway,
        *price_gateway,
        *email_gateway,
        *formatter,
        params,
    ) {
        Ok(outcomes) if outcomes.is_empty() => json_response(
            200,
            &json::Message {
                message: NO_SUBSCRIPTIONS_MESSAGE.to_owned(),
            },
        ),
        Ok(outcomes) => {
            let outcomes: Vec<json::Outcome> = outcomes.into_iter().map(Into::into).collect();
            json_response(200, &outcomes)
        }
        Err(err) => {
            log::error!("Error fetching fuel prices: {err}");
            total_failure()
        }
    }
}

fn total_failure() -> TriggerResponse {
    TriggerResponse {
        status_code: 500,
        body: serde_json::json!({ "error": TOTAL_FAILURE_MESSAGE }),
    }
}

fn json_response<T: Serialize>(status_code: u16, body: &T) -> TriggerResponse {
    match serde_json::to_value(body) {
        Ok(body) => TriggerResponse { status_code, body },
        Err(err) => {
            log::error!("Unable to serialize response: {err}");
            total_failure()
        }
    }
}
