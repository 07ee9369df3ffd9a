use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::{account::Role, auth::event::CreateToken};
use registry::AppRegistry;
use shared::error::AppResult;

use super::today;
use crate::{
    extractor::{AppJson, AuthorizedAccount},
    model::auth::{LoginRequest, LoginResponse},
};

pub async fn admin_login(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    login(Role::Admin, registry, req).await
}

pub async fn management_login(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    login(Role::Management, registry, req).await
}

#[tracing::instrument(skip(registry, req), fields(username = %req.username))]
async fn login(
    role: Role,
    registry: AppRegistry,
    req: LoginRequest,
) -> AppResult<Json<LoginResponse>> {
    req.validate(&())?;

    // ログインのたびに支払い状況を最新にする
    registry
        .customer_repository()
        .reconcile_payment_status(today())
        .await?;

    let account = registry
        .account_repository()
        .verify(role, &req.username, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(role, account.account_id))
        .await?;
    tracing::info!(account_id = %account.account_id, "Logged in");

    Ok(Json(LoginResponse::new(access_token, account.into())))
}

pub async fn logout(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(account.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
