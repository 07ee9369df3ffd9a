use super::{
    account::build_account_routers, auth::build_auth_routers, customer::build_customer_routers,
    health::build_health_check_routers, job::build_job_routers, payment::build_payment_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_customer_routers())
        .merge(build_payment_routers())
        .merge(build_auth_routers())
        .merge(build_account_routers())
        .merge(build_job_routers());
    Router::new().nest("/api/v1", router)
}
