use crate::model::{customer::PaymentStatus, id::CustomerId};
use chrono::NaiveDate;

pub struct CreateCustomer {
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
    pub payment_status: PaymentStatus,
}

// 編集は全項目の置き換え
#[derive(Debug)]
pub struct UpdateCustomer {
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
    pub payment_status: PaymentStatus,
}
