use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::payment::{approve_payment, show_payment_list};

pub fn build_payment_routers() -> Router<AppRegistry> {
    let payments_routers = Router::new()
        .route("/", post(approve_payment))
        .route("/", get(show_payment_list));

    Router::new().nest("/payments", payments_routers)
}
