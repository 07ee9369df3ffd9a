pub mod account;
pub mod auth;
pub mod customer;
pub mod health;
pub mod job;
pub mod payment;
pub mod v1;
