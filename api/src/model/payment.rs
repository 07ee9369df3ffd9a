use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    customer::PaymentStatus,
    id::{CustomerId, PaymentId},
    payment::{
        event::{ApprovePayment, ApprovedPayment},
        Coverage, Payment, PaymentCustomer,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovePaymentRequest {
    pub customer_id: CustomerId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    // 指定がなければ月額から計算する
    pub amount: Option<i64>,
}

impl TryFrom<ApprovePaymentRequest> for ApprovePayment {
    type Error = AppError;

    fn try_from(value: ApprovePaymentRequest) -> AppResult<Self> {
        let ApprovePaymentRequest {
            customer_id,
            start_date,
            end_date,
            amount,
        } = value;

        if matches!(amount, Some(amount) if amount < 1) {
            return Err(AppError::BadRequest("amount must be positive".into()));
        }

        Ok(ApprovePayment::new(
            customer_id,
            Coverage::new(start_date, end_date)?,
            amount,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedPaymentResponse {
    pub payment_id: PaymentId,
    pub amount: i64,
}

impl From<ApprovedPayment> for ApprovedPaymentResponse {
    fn from(value: ApprovedPayment) -> Self {
        let ApprovedPayment { payment_id, amount } = value;
        Self { payment_id, amount }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCustomerResponse {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
}

impl From<PaymentCustomer> for PaymentCustomerResponse {
    fn from(value: PaymentCustomer) -> Self {
        let PaymentCustomer {
            customer_id,
            first_name,
            last_name,
        } = value;
        Self {
            customer_id,
            first_name,
            last_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_id: PaymentId,
    pub amount: i64,
    pub payment_date: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub payment_status: PaymentStatus,
    pub customer: PaymentCustomerResponse,
}

impl From<Payment> for PaymentResponse {
    fn from(value: Payment) -> Self {
        let Payment {
            payment_id,
            amount,
            payment_date,
            start_date,
            end_date,
            duration_days,
            payment_status,
            customer,
        } = value;
        Self {
            payment_id,
            amount,
            payment_date,
            start_date,
            end_date,
            duration_days,
            payment_status,
            customer: customer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsResponse {
    pub items: Vec<PaymentResponse>,
}

impl From<Vec<Payment>> for PaymentsResponse {
    fn from(value: Vec<Payment>) -> Self {
        Self {
            items: value.into_iter().map(PaymentResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: Option<i64>, end: &str) -> ApprovePaymentRequest {
        serde_json::from_value(serde_json::json!({
            "customerId": CustomerId::new(),
            "startDate": "2024-01-01",
            "endDate": end,
            "amount": amount,
        }))
        .unwrap()
    }

    #[test]
    fn amount_is_optional() {
        let event = ApprovePayment::try_from(request(None, "2024-01-31")).unwrap();
        assert_eq!(event.amount, None);
        assert_eq!(event.coverage.days(), 30);
    }

    #[test]
    fn non_positive_override_is_rejected() {
        let res = ApprovePayment::try_from(request(Some(0), "2024-01-31"));
        assert!(matches!(res, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn coverage_ending_before_it_starts_is_rejected() {
        let res = ApprovePayment::try_from(request(None, "2023-12-31"));
        assert!(matches!(res, Err(AppError::BadRequest(_))));
    }
}
