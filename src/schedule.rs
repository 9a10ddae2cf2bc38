use crate::trigger::{TriggerEvent, TriggerResponse};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use time::{OffsetDateTime, Time};

/// The first point in time after `now` at the given daily time.
pub fn next_run(now: OffsetDateTime, daily_at: Time) -> OffsetDateTime {
    let today = now.replace_time(daily_at);
    if today > now {
        today
    } else {
        today + time::Duration::DAY
    }
}

/// Runs the trigger once per day until Ctrl-C is pressed.
///
/// The trigger is executed on the blocking thread pool. An interrupted
/// run is asked to abort and finishes before this function returns.
pub async fn run<T>(daily_at: Time, trigger: T)
where
    T: Fn(&TriggerEvent, &AtomicBool) -> TriggerResponse + Send + Sync + 'static,
{
    let trigger = Arc::new(trigger);
    let abort = Arc::new(AtomicBool::new(false));
    log::info!("Checking fuel prices daily at {daily_at} UTC");

    loop {
        let now = OffsetDateTime::now_utc();
        let scheduled = next_run(now, daily_at);
        log::info!("Next run at {scheduled}");
        let delay = std::time::Duration::try_from(scheduled - now).unwrap_or_default();

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Stopping scheduler");
                return;
            }
        }

        let event = TriggerEvent {
            next_run: Some(next_run(scheduled, daily_at)),
        };
        let mut task = tokio::task::spawn_blocking({
            let trigger = Arc::clone(&trigger);
            let abort = Arc::clone(&abort);
            move || (*trigger)(&event, abort.as_ref())
        });

        let result = tokio::select! {
            result = &mut task => result,
            _ = tokio::signal::ctrl_c() => {
                log::info!("Aborting current run");
                abort.store(true, Ordering::Relaxed);
                if let Ok(response) = task.await {
                    log_response(&response);
                }
                log::info!("Stopping scheduler");
                return;
            }
        };
        match result {
            Ok(response) => log_response(&response),
            Err(err) => log::error!("Fuel price check panicked: {err}"),
        }
    }
}

fn log_response(response: &TriggerResponse) {
    if response.status_code >= 500 {
        log::error!("Run failed: {}", response.body);
    } else {
        log::info!("Run finished: {}", response.body);
    }
}
