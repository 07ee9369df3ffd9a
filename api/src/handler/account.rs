use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::account::Role;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AppJson, AuthorizedAccount},
    model::account::{
        AccountCreatedResponse, CreateAccountRequest, CreateAccountRequestWithRole,
        MessageResponse, UpdateAccountPasswordRequest, UpdateAccountPasswordRequestWithRole,
    },
};

// 管理者が 1 人もいない間だけ、トークンなしで最初の管理者を作れる
#[tracing::instrument(skip_all)]
pub async fn register_admin(
    account: Option<AuthorizedAccount>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<AccountCreatedResponse>)> {
    req.validate(&())?;

    let accounts = registry.account_repository();
    match account {
        Some(account) if !account.is_admin() => return Err(AppError::ForbiddenOperation),
        Some(_) => {}
        None => {
            if accounts.count(Role::Admin).await? > 0 {
                return Err(AppError::UnauthorizedError);
            }
            tracing::info!("Creating the first admin");
        }
    }

    let account_id = accounts
        .create(CreateAccountRequestWithRole::new(Role::Admin, req).into())
        .await?;

    Ok((StatusCode::CREATED, Json(account_id.into())))
}

#[tracing::instrument(skip_all, fields(account = %account.account.username))]
pub async fn register_management_member(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<AccountCreatedResponse>)> {
    if !account.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let account_id = registry
        .account_repository()
        .create(CreateAccountRequestWithRole::new(Role::Management, req).into())
        .await?;

    Ok((StatusCode::CREATED, Json(account_id.into())))
}

pub async fn change_admin_password(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateAccountPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    change_password(Role::Admin, registry, req).await
}

pub async fn change_management_password(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateAccountPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    change_password(Role::Management, registry, req).await
}

async fn change_password(
    role: Role,
    registry: AppRegistry,
    req: UpdateAccountPasswordRequest,
) -> AppResult<Json<MessageResponse>> {
    req.validate(&())?;

    registry
        .account_repository()
        .update_password(UpdateAccountPasswordRequestWithRole::new(role, req).into())
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
