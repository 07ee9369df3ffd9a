use axum::{extract::State, http::StatusCode, Json};
use kernel::model::payment::event::ApprovePayment;
use registry::AppRegistry;
use shared::error::AppResult;

use super::today;
use crate::{
    extractor::{AppJson, AuthorizedAccount},
    model::payment::{ApprovePaymentRequest, ApprovedPaymentResponse, PaymentsResponse},
};

#[tracing::instrument(skip_all, fields(account = %account.account.username))]
pub async fn approve_payment(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<ApprovePaymentRequest>,
) -> AppResult<(StatusCode, Json<ApprovedPaymentResponse>)> {
    let event = ApprovePayment::try_from(req)?;

    registry
        .customer_repository()
        .reconcile_payment_status(today())
        .await?;

    let customer_id = event.customer_id;
    let approved = registry.payment_repository().approve(event).await?;
    tracing::info!(
        %customer_id,
        payment_id = %approved.payment_id,
        amount = approved.amount,
        "Payment approved"
    );

    Ok((StatusCode::CREATED, Json(approved.into())))
}

pub async fn show_payment_list(
    _account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaymentsResponse>> {
    registry
        .customer_repository()
        .reconcile_payment_status(today())
        .await?;

    registry
        .payment_repository()
        .find_all()
        .await
        .map(PaymentsResponse::from)
        .map(Json)
}
