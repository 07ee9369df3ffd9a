use chrono::{Local, NaiveDate};

pub mod account;
pub mod auth;
pub mod customer;
pub mod health;
pub mod job;
pub mod payment;

// 支払い状況はサーバーのローカル日付で判定する
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
