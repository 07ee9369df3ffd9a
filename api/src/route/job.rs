use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::job::trigger_due_rent_notification;

pub fn build_job_routers() -> Router<AppRegistry> {
    let jobs_routers =
        Router::new().route("/due-rent-notification", get(trigger_due_rent_notification));

    Router::new().nest("/jobs", jobs_routers)
}
