use axum::{extract::State, Json};
use registry::AppRegistry;

use super::today;
use crate::{job::run_daily_jobs, model::job::NotificationJobResponse};

// 外部の定期実行サービスから叩けるよう認証なしで公開する
pub async fn trigger_due_rent_notification(
    State(registry): State<AppRegistry>,
) -> Json<NotificationJobResponse> {
    Json(run_daily_jobs(&registry, today()).await)
}
