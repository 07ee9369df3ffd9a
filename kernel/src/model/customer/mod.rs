use crate::model::id::CustomerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

// 支払状況は賃貸契約の満了日から導出される
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    // 満了日が今日以降なら Paid
    pub fn derive(lease_expire_date: NaiveDate, today: NaiveDate) -> Self {
        if lease_expire_date >= today {
            Self::Paid
        } else {
            Self::Unpaid
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
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

#[derive(Debug, Clone, PartialEq)]
pub struct UnpaidCustomer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub monthly_rent: i64,
    pub lease_expire_date: NaiveDate,
    pub days_unpaid: i64,
}

impl UnpaidCustomer {
    pub fn days_overdue(lease_expire_date: NaiveDate, today: NaiveDate) -> i64 {
        (today - lease_expire_date).num_days().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lease_ending_today_is_still_paid() {
        let today = date(2024, 3, 10);
        assert_eq!(PaymentStatus::derive(today, today), PaymentStatus::Paid);
        assert_eq!(
            PaymentStatus::derive(date(2024, 3, 9), today),
            PaymentStatus::Unpaid
        );
    }

    #[test]
    fn status_names_round_trip_through_strings() {
        assert_eq!(PaymentStatus::Paid.as_ref(), "Paid");
        assert_eq!("Unpaid".parse::<PaymentStatus>().ok(), Some(PaymentStatus::Unpaid));
        assert!("paid?".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn days_overdue_never_goes_negative() {
        let today = date(2024, 3, 10);
        assert_eq!(UnpaidCustomer::days_overdue(date(2024, 3, 1), today), 9);
        assert_eq!(UnpaidCustomer::days_overdue(date(2024, 4, 1), today), 0);
    }
}
