use axum::{
    routing::{post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::account::{
    change_admin_password, change_management_password, register_admin,
    register_management_member,
};

pub fn build_account_routers() -> Router<AppRegistry> {
    let admins_routers = Router::new()
        .route("/", post(register_admin))
        .route("/password", put(change_admin_password));
    let members_routers = Router::new()
        .route("/", post(register_management_member))
        .route("/password", put(change_management_password));

    Router::new()
        .nest("/admins", admins_routers)
        .nest("/management-members", members_routers)
}
