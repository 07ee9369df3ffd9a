use crate::model::{
    customer::PaymentStatus,
    id::{CustomerId, PaymentId},
};
use chrono::{DateTime, NaiveDate, Utc};
use shared::error::{AppError, AppResult};

pub mod event;

// 1 か月を 30 日として按分する
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub amount: i64,
    pub payment_date: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub payment_status: PaymentStatus,
    pub customer: PaymentCustomer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCustomer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
}

// 承認された支払いの対象期間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Coverage {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<Self> {
        if end_date < start_date {
            return Err(AppError::BadRequest(format!(
                "end date {end_date} is before start date {start_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    // 上書き金額があればそれを使い、なければ月額 × 期間（月）を四捨五入する
    pub fn amount(&self, monthly_rent: i64, override_amount: Option<i64>) -> i64 {
        match override_amount {
            Some(amount) => amount,
            None => (monthly_rent as f64 * self.days() as f64 / DAYS_PER_MONTH).round() as i64,
        }
    }
}
