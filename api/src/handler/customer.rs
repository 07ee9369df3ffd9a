use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::id::CustomerId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use super::today;
use crate::{
    extractor::{AppJson, AppPath, AuthorizedAccount},
    model::{
        customer::{
            CreateCustomerRequest, CustomerCreatedResponse, CustomerResponse, CustomersResponse,
            UnpaidCustomersResponse, UpdateCustomerRequest, UpdateCustomerRequestWithId,
        },
        payment::PaymentsResponse,
    },
};

#[tracing::instrument(skip_all, fields(account = %account.account.username))]
pub async fn register_customer(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateCustomerRequest>,
) -> AppResult<(StatusCode, Json<CustomerCreatedResponse>)> {
    req.validate(&())?;

    let customer_id = registry
        .customer_repository()
        .create(req.into_event(today())?)
        .await?;
    tracing::info!(%customer_id, "Customer registered");

    Ok((
        StatusCode::CREATED,
        Json(CustomerCreatedResponse { customer_id }),
    ))
}

pub async fn show_customer_list(
    _account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CustomersResponse>> {
    let customers = registry.customer_repository();
    customers.reconcile_payment_status(today()).await?;

    customers
        .find_all()
        .await
        .map(CustomersResponse::from)
        .map(Json)
}

pub async fn show_unpaid_customer_list(
    _account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UnpaidCustomersResponse>> {
    let today = today();
    let customers = registry.customer_repository();
    customers.reconcile_payment_status(today).await?;

    customers
        .find_unpaid(today)
        .await
        .map(UnpaidCustomersResponse::from)
        .map(Json)
}

pub async fn show_customer(
    _account: AuthorizedAccount,
    AppPath(customer_id): AppPath<CustomerId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CustomerResponse>> {
    registry
        .customer_repository()
        .find_by_id(customer_id)
        .await
        .and_then(|c| match c {
            Some(c) => Ok(Json(c.into())),
            None => Err(AppError::EntityNotFound("Customer not found".into())),
        })
}

#[tracing::instrument(skip_all, fields(%customer_id, account = %account.account.username))]
pub async fn update_customer(
    account: AuthorizedAccount,
    AppPath(customer_id): AppPath<CustomerId>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateCustomerRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_customer = UpdateCustomerRequestWithId::new(customer_id, req);
    registry
        .customer_repository()
        .update(update_customer.into_event(today())?)
        .await
        .map(|_| StatusCode::OK)
}

#[tracing::instrument(skip_all, fields(%customer_id, account = %account.account.username))]
pub async fn delete_customer(
    account: AuthorizedAccount,
    AppPath(customer_id): AppPath<CustomerId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .customer_repository()
        .delete(customer_id)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_customer_payment_list(
    _account: AuthorizedAccount,
    AppPath(customer_id): AppPath<CustomerId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaymentsResponse>> {
    registry
        .payment_repository()
        .find_by_customer_id(customer_id)
        .await
        .map(PaymentsResponse::from)
        .map(Json)
}
