pub mod account;
pub mod auth;
pub mod customer;
pub mod id;
pub mod notification;
pub mod payment;
