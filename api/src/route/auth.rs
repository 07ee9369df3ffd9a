use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::auth::{admin_login, logout, management_login};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let auth_routers = Router::new()
        .route("/admin/login", post(admin_login))
        .route("/management/login", post(management_login))
        .route("/logout", post(logout));

    Router::new().nest("/auth", auth_routers)
}
