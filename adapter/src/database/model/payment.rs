use crate::database::model::customer::parse_status;
use kernel::model::{
    id::{CustomerId, PaymentId},
    payment::{Payment, PaymentCustomer},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};

// 支払い一覧を取得する際に使う型（入居者名を JOIN する）
#[derive(sqlx::FromRow)]
pub struct PaymentRow {
    pub payment_id: PaymentId,
    pub customer_id: CustomerId,
    pub amount: i64,
    pub payment_date: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub payment_status: String,
    pub first_name: String,
    pub last_name: String,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = AppError;

    fn try_from(value: PaymentRow) -> Result<Self, Self::Error> {
        let PaymentRow {
            payment_id,
            customer_id,
            amount,
            payment_date,
            start_date,
            end_date,
            duration_days,
            payment_status,
            first_name,
            last_name,
        } = value;
        Ok(Payment {
            payment_id,
            amount,
            payment_date,
            start_date,
            end_date,
            duration_days,
            payment_status: parse_status(&payment_status)?,
            customer: PaymentCustomer {
                customer_id,
                first_name,
                last_name,
            },
        })
    }
}
