use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use registry::AppRegistry;

use crate::model::job::NotificationJobResponse;

// 支払い状況を更新してから、明日が期日の入居者を通知する。
// 失敗はログに残し、呼び出し側には failed として返す
pub async fn run_daily_jobs(registry: &AppRegistry, today: NaiveDate) -> NotificationJobResponse {
    match registry
        .customer_repository()
        .reconcile_payment_status(today)
        .await
    {
        Ok(changed) => tracing::info!(changed, "Payment statuses reconciled"),
        Err(e) => tracing::error!(error = %e, "Failed to reconcile payment statuses"),
    }

    match registry.due_rent_notifier().run(today).await {
        Ok(outcome) => {
            tracing::info!(?outcome, "Due rent notification finished");
            outcome.into()
        }
        Err(e) => {
            tracing::error!(error = %e, "Due rent notification failed");
            NotificationJobResponse::failed()
        }
    }
}

// now より後で、最初に hour 時ちょうどになる日時
pub fn next_run_after(now: NaiveDateTime, hour: u32) -> NaiveDateTime {
    let at = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let run = now.date().and_time(at);
    if run > now {
        run
    } else {
        run + Duration::days(1)
    }
}

pub async fn run_scheduler(registry: AppRegistry, hour: u32) {
    loop {
        let now = Local::now().naive_local();
        let next = next_run_after(now, hour);
        tracing::info!(next_run = %next, "Daily rent jobs scheduled");

        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        run_daily_jobs(&registry, Local::now().date_naive()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn runs_later_today_when_the_hour_is_ahead() {
        assert_eq!(next_run_after(at(10, 1, 30), 2), at(10, 2, 0));
    }

    #[test]
    fn runs_tomorrow_once_the_hour_has_passed() {
        assert_eq!(next_run_after(at(10, 2, 0), 2), at(11, 2, 0));
        assert_eq!(next_run_after(at(10, 23, 59), 2), at(11, 2, 0));
    }

    #[test]
    fn month_end_rolls_over() {
        assert_eq!(next_run_after(at(31, 5, 0), 0), at(31, 5, 0) + Duration::hours(19));
    }
}
