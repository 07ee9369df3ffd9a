pub mod extractor;
pub mod handler;
pub mod job;
pub mod model;
pub mod route;
