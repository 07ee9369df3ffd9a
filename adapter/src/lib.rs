pub mod database;
pub mod mail;
pub mod redis;
pub mod repository;
