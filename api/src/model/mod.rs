pub mod account;
pub mod auth;
pub mod customer;
pub mod job;
pub mod payment;
