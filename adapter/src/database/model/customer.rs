use kernel::model::{
    customer::{Customer, PaymentStatus, UnpaidCustomer},
    id::CustomerId,
};
use shared::error::AppError;
use sqlx::types::chrono::NaiveDate;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub tin_number: String,
    pub phone_number: String,
    pub room_size_sq_m: f64,
    pub house_number: String,
    pub floor_number: i32,
    pub monthly_rent: i64,
    pub annual_rent: i64,
    pub rent_date: NaiveDate,
    pub lease_expire_date: NaiveDate,
    pub payment_status: String,
}

pub(crate) fn parse_status(value: &str) -> Result<PaymentStatus, AppError> {
    PaymentStatus::from_str(value)
        .map_err(|_| AppError::ConversionEntityError(format!("unknown payment status: {value}")))
}

impl TryFrom<CustomerRow> for Customer {
    type Error = AppError;

    fn try_from(value: CustomerRow) -> Result<Self, Self::Error> {
        let CustomerRow {
            customer_id,
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
            payment_status,
        } = value;
        Ok(Customer {
            customer_id,
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
            payment_status: parse_status(&payment_status)?,
        })
    }
}

// 未払い一覧用。延滞日数は SQL 側で計算する
#[derive(sqlx::FromRow)]
pub struct UnpaidCustomerRow {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub monthly_rent: i64,
    pub lease_expire_date: NaiveDate,
    pub days_unpaid: i32,
}

impl From<UnpaidCustomerRow> for UnpaidCustomer {
    fn from(value: UnpaidCustomerRow) -> Self {
        let UnpaidCustomerRow {
            customer_id,
            first_name,
            last_name,
            monthly_rent,
            lease_expire_date,
            days_unpaid,
        } = value;
        UnpaidCustomer {
            customer_id,
            first_name,
            last_name,
            monthly_rent,
            lease_expire_date,
            days_unpaid: days_unpaid.into(),
        }
    }
}
